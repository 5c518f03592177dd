use std::collections::BTreeSet;

use super::*;

use crate::constants::GAME_OVER_COMMAND;

impl MilitiaMode {
    pub(super) fn check_for_winner(&mut self, host: &mut dyn Host) {
        if self.round.ended() {
            return;
        }
        if let Some(outcome) = self.evaluate_outcome(host) {
            self.finish_round(host, outcome);
        }
    }

    /// Elimination first, then last team standing. Escorts never count.
    pub fn evaluate_outcome(&self, host: &dyn Host) -> Option<RoundOutcome> {
        let escorts = &self.round.escorts;
        let main_players: Vec<_> = host
            .players()
            .into_iter()
            .filter(|player| !escorts.contains(player.id))
            .collect();

        let colonels_dead = self
            .round
            .colonels
            .keys()
            .all(|team| self.live_colonel(host, *team).is_none());
        let humans_dead = main_players
            .iter()
            .filter(|player| player.human())
            .all(|player| !player.alive());
        if colonels_dead && humans_dead {
            return Some(RoundOutcome::Eliminated);
        }

        let standing: BTreeSet<Team> = main_players
            .iter()
            .filter(|player| player.alive() && player.team.is_playable())
            .map(|player| player.team)
            .collect();
        let mut teams = standing.into_iter();
        match (teams.next(), teams.next()) {
            (None, _) => Some(RoundOutcome::Draw),
            (Some(team), None) => Some(RoundOutcome::Winner { team }),
            _ => None,
        }
    }

    /// Terminal for the round: the queue is discarded and every timer stops,
    /// so nothing is announced twice.
    pub(super) fn finish_round(&mut self, host: &mut dyn Host, outcome: RoundOutcome) {
        self.round.phase = RoundPhase::Ended(outcome);
        self.round.respawns.clear();
        self.timers.cancel_all(host);
        host.show_popup(&outcome_message(outcome));
        host.run_command(GAME_OVER_COMMAND);
        self.events.push(ModeEvent::RoundOver { outcome });
        eprintln!("[militia] round over: {outcome:?}");
    }
}
