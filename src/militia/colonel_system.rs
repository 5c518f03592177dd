use super::*;

use crate::constants::COLONEL_NAME;
use crate::profiles::general_profile;
use crate::roster;
use crate::types::{AiType, BotBehavior, CameraFocus, Modifiers, PlayerSnapshot, WeaponItem};

/// What the colonel handle for a team resolves to right now.
#[derive(Clone, Debug, PartialEq)]
pub enum ColonelState {
    Missing,
    Alive(PlayerSnapshot),
    Dead,
}

impl MilitiaMode {
    pub fn colonel(&self, team: Team) -> Option<EntityId> {
        self.round.colonels.get(&team).copied()
    }

    pub fn colonel_state(&self, host: &dyn Host, team: Team) -> ColonelState {
        let Some(id) = self.colonel(team) else {
            return ColonelState::Missing;
        };
        match resolve_alive(host, id) {
            Some(colonel) => ColonelState::Alive(colonel),
            None => ColonelState::Dead,
        }
    }

    pub(super) fn live_colonel(&self, host: &dyn Host, team: Team) -> Option<PlayerSnapshot> {
        match self.colonel_state(host, team) {
            ColonelState::Alive(colonel) => Some(colonel),
            _ => None,
        }
    }

    pub(super) fn identify_colonels(&mut self, host: &mut dyn Host) {
        if self.round.ended() {
            return;
        }
        for team in roster::active_teams(host) {
            if self.colonel_state(host, team) == ColonelState::Missing {
                self.create_colonel(host, team);
            }
        }
    }

    /// Creates the team's colonel at its first live member. Escorts only exist
    /// for teams that already have a colonel, so the member is a main player.
    /// A team whose colonel exists, dead or alive, never gets another one.
    pub(super) fn create_colonel(&mut self, host: &mut dyn Host, team: Team) -> Option<EntityId> {
        if self.colonel(team).is_some() {
            return None;
        }
        let anchor = roster::first_member(host, team)?;

        let Some(id) = host.create_player(anchor.position) else {
            eprintln!("[militia] host refused to create a colonel for {team:?}");
            return None;
        };
        host.set_team(id, team);
        host.set_name(id, COLONEL_NAME);
        host.set_bot_behavior(id, BotBehavior::bot(AiType::BotD));
        host.set_visibility(id, Visibility::SHOWN);
        host.set_camera_focus(id, CameraFocus::Focus);
        host.set_modifiers(id, &Modifiers::with_health(self.config.colonel_health));
        for weapon in [WeaponItem::Magnum, WeaponItem::Katana, WeaponItem::Grenades] {
            host.give_weapon(id, weapon);
        }
        host.set_profile(id, &general_profile(team));

        self.round.colonels.insert(team, id);
        host.show_popup(&format!("{} COLONEL HAS ARRIVED", team.label()));
        self.events
            .push(ModeEvent::ColonelAssigned { team, entity: id });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::militia::tests::militia_host;
    use crate::sim::SimHost;
    use crate::types::Vec2;

    #[test]
    fn one_colonel_per_active_team_after_the_delay() {
        let mut host = militia_host(&[Team::Team1, Team::Team2], 2, 1);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 1);
        host.start(&mut mode);
        assert_eq!(mode.colonel_state(&host, Team::Team1), ColonelState::Missing);

        host.advance(&mut mode, 1_000);

        for team in [Team::Team1, Team::Team2] {
            let ColonelState::Alive(colonel) = mode.colonel_state(&host, team) else {
                panic!("{team:?} should have a live colonel");
            };
            assert_eq!(colonel.team, team);
            assert_eq!(colonel.modifiers.max_health, 600);
            assert_eq!(colonel.behavior, BotBehavior::bot(AiType::BotD));
            assert_eq!(colonel.camera, CameraFocus::Focus);
            assert_eq!(host.name_of(colonel.id), Some("COLONEL"));
            assert!(host.has_weapon(colonel.id, WeaponItem::Magnum));
            assert!(host.has_weapon(colonel.id, WeaponItem::Katana));
        }
        assert_eq!(mode.colonel_state(&host, Team::Team3), ColonelState::Missing);
        assert!(host
            .popups()
            .iter()
            .any(|popup| popup == "TEAM 1 COLONEL HAS ARRIVED"));
    }

    #[test]
    fn colonel_spawns_on_the_first_live_member() {
        let mut host = SimHost::new(2);
        let fallen = host.add_player(Team::Team2, true, Vec2::new(5.0, 5.0));
        host.add_player(Team::Team2, true, Vec2::new(70.0, 20.0));
        host.force_dead(fallen);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 1);
        host.start(&mut mode);
        host.advance(&mut mode, 1_000);

        let ColonelState::Alive(colonel) = mode.colonel_state(&host, Team::Team2) else {
            panic!("colonel expected");
        };
        assert_eq!(colonel.position, Vec2::new(70.0, 20.0));
    }

    #[test]
    fn dead_colonel_is_never_replaced() {
        let mut host = militia_host(&[Team::Team1, Team::Team2], 2, 0);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 1);
        host.start(&mut mode);
        host.advance(&mut mode, 1_000);
        let colonel = mode.colonel(Team::Team1).expect("colonel");
        host.kill(colonel);
        host.deliver_deaths(&mut mode);

        assert_eq!(mode.colonel_state(&host, Team::Team1), ColonelState::Dead);
        assert!(mode.create_colonel(&mut host, Team::Team1).is_none());
        mode.identify_colonels(&mut host);
        assert_eq!(mode.colonel(Team::Team1), Some(colonel));
    }

    #[test]
    fn refused_creation_leaves_the_team_without_a_colonel() {
        let mut host = militia_host(&[Team::Team1], 2, 0);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 1);
        host.start(&mut mode);
        host.refuse_creation(true);
        host.advance(&mut mode, 1_000);

        assert_eq!(mode.colonel_state(&host, Team::Team1), ColonelState::Missing);
    }
}
