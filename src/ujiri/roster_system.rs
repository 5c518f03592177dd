use super::*;

use crate::constants::{
    LEAD_ENERGY_FACTOR, LEAD_RECHARGE_FACTOR, LEAD_RUN_SPEED, LEAD_SPRINT_SPEED,
    PSYTHIC_RUN_SPEED, PSYTHIC_SIZE, PSYTHIC_SPRINT_SPEED, SECOND_MELEE_DAMAGE,
    SECOND_MELEE_FORCE, SECOND_RUN_SPEED, SECOND_SIZE, SECOND_SPRINT_SPEED,
    TRANSFORM_RUN_FACTOR, TRANSFORM_SPRINT_FACTOR,
};
use crate::host::update_modifiers;
use crate::types::{BotBehavior, CameraFocus, Vec2, WeaponItem};

/// Where each team's bots gather when the map has too few path nodes:
/// player #1 and player #2 anchor their own teams, and fill in for each
/// other when neither sits on the matching team.
pub fn team_anchors(players: &[PlayerSnapshot]) -> (Vec2, Vec2) {
    let [first, second, ..] = players else {
        let only = players.first().map_or(Vec2::ZERO, |player| player.position);
        return (only, only);
    };

    let mut team1 = None;
    let mut team2 = None;
    for player in [first, second] {
        match player.team {
            Team::Team1 => team1 = Some(player.position),
            Team::Team2 => team2 = Some(player.position),
            _ => {}
        }
    }
    match (team1, team2) {
        (Some(team1), Some(team2)) => (team1, team2),
        (None, None) => (second.position, first.position),
        (None, Some(team2)) => {
            let other = if first.team != Team::Team2 { first } else { second };
            (other.position, team2)
        }
        (Some(team1), None) => {
            let other = if first.team != Team::Team1 { first } else { second };
            (team1, other.position)
        }
    }
}

impl UjiriMode {
    fn roster_positions(&mut self, host: &dyn Host) -> Vec<Vec2> {
        let mut nodes = host.path_nodes();
        if nodes.len() >= RosterBot::ALL.len() {
            self.round.rng.shuffle(&mut nodes);
            nodes.truncate(RosterBot::ALL.len());
            return nodes;
        }
        let (team1, team2) = team_anchors(&host.players());
        RosterBot::ALL
            .iter()
            .map(|which| match which.team() {
                Team::Team1 => team1,
                _ => team2,
            })
            .collect()
    }

    pub(super) fn spawn_roster(&mut self, host: &mut dyn Host) {
        let positions = self.roster_positions(host);
        for (which, position) in RosterBot::ALL.into_iter().zip(positions) {
            let Some(id) = host.create_player(position) else {
                eprintln!("[ujiri] host refused to create {}", which.name());
                continue;
            };
            host.set_team(id, which.team());
            host.set_name(id, which.name());
            host.set_bot_behavior(id, BotBehavior::bot(which.ai()));
            host.set_camera_focus(id, CameraFocus::Ignore);
            host.set_profile(id, &which.profile());
            self.round.roster.insert(which, id);
        }

        self.prepare_psythic(host);
        if let Some(edur) = self.live_bot(host, RosterBot::Edur) {
            self.round.edur_base_size = edur.modifiers.size;
        }
        if let Some(xray) = self.bot(RosterBot::Xray) {
            host.give_weapon(xray, WeaponItem::Lazer);
            host.set_guard_target(xray, self.bot(RosterBot::Psythic));
        }
    }

    /// Psythic starts full: small, fast and at boosted health.
    fn prepare_psythic(&mut self, host: &mut dyn Host) {
        let Some(psythic) = self.bot(RosterBot::Psythic) else {
            return;
        };
        let factor = self.config.psythic_full_health_factor;
        let mut base_health = self.round.psythic_base_health;
        update_modifiers(host, psythic, |mods| {
            base_health = mods.max_health;
            mods.size = PSYTHIC_SIZE;
            mods.run_speed = PSYTHIC_RUN_SPEED;
            mods.sprint_speed = PSYTHIC_SPRINT_SPEED;
            mods.max_health = base_health * factor;
            mods.restore_full_health();
        });
        self.round.psythic_base_health = base_health;
        self.round.hunger = Hunger::full(host.now_ms());
    }

    /// Speed and sidearms for the players who were present before the
    /// roster arrived, plus the lead duelist boosts.
    pub(super) fn transform_starters(&mut self, host: &mut dyn Host, starters: &[EntityId]) {
        if let Some(first) = starters.first() {
            update_modifiers(host, *first, |mods| {
                mods.run_speed = LEAD_RUN_SPEED;
                mods.sprint_speed = LEAD_SPRINT_SPEED;
                mods.max_energy = (mods.max_energy as f32 * LEAD_ENERGY_FACTOR) as i32;
                mods.current_energy = (mods.current_energy * LEAD_ENERGY_FACTOR).trunc();
                mods.energy_recharge *= LEAD_RECHARGE_FACTOR;
            });
        }
        if let Some(second) = starters.get(1) {
            update_modifiers(host, *second, |mods| {
                mods.size = SECOND_SIZE;
                mods.run_speed = SECOND_RUN_SPEED;
                mods.sprint_speed = SECOND_SPRINT_SPEED;
                mods.melee_force *= SECOND_MELEE_FORCE;
                mods.melee_damage_dealt *= SECOND_MELEE_DAMAGE;
            });
        }
        for id in starters {
            if update_modifiers(host, *id, |mods| {
                mods.run_speed *= TRANSFORM_RUN_FACTOR;
                mods.sprint_speed *= TRANSFORM_SPRINT_FACTOR;
            })
            .is_none()
            {
                continue;
            }
            host.give_weapon(*id, WeaponItem::Grenades);
            host.give_weapon(*id, WeaponItem::Pistol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use crate::ujiri::tests::{started, ujiri_host};

    fn at(team: Team, x: f32) -> PlayerSnapshot {
        let mut host = SimHost::new(1);
        let id = host.add_player(team, false, Vec2::new(x, 0.0));
        host.player(id).expect("player")
    }

    #[test]
    fn anchors_follow_the_lead_players_teams() {
        let a = at(Team::Team2, 1.0);
        let b = at(Team::Team1, 2.0);
        assert_eq!(team_anchors(&[a.clone(), b.clone()]), (b.position, a.position));

        let c = at(Team::Team3, 3.0);
        let d = at(Team::Team4, 4.0);
        assert_eq!(team_anchors(&[c.clone(), d.clone()]), (d.position, c.position));

        assert_eq!(team_anchors(&[c.clone(), a.clone()]), (c.position, a.position));
        assert_eq!(team_anchors(&[c.clone()]), (c.position, c.position));
        assert_eq!(team_anchors(&[]), (Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn roster_uses_distinct_path_nodes_when_enough_exist() {
        let (host, mode) = started(12, UjiriConfig::default());
        let mut xs: Vec<i32> = RosterBot::ALL
            .iter()
            .filter_map(|which| mode.bot(*which))
            .filter_map(|id| host.player(id))
            .map(|bot| bot.position.x as i32)
            .collect();
        xs.sort_unstable();
        xs.dedup();
        assert_eq!(xs.len(), 7);
        assert!(xs.iter().all(|x| *x >= 0 && x % 50 == 0));
    }

    #[test]
    fn sparse_map_gathers_bots_at_team_anchors() {
        let (host, mode) = started(6, UjiriConfig::default());
        for which in RosterBot::ALL {
            let bot = host.player(mode.bot(which).expect("bot")).expect("present");
            let expected = match which.team() {
                Team::Team1 => -100.0,
                _ => 900.0,
            };
            assert_eq!(bot.position.x, expected);
        }
    }

    #[test]
    fn psythic_starts_full_and_xray_guards_it() {
        let (host, mode) = started(10, UjiriConfig::default());
        let psythic = host.player(mode.bot(RosterBot::Psythic).expect("psythic")).expect("present");
        assert_eq!(psythic.modifiers.max_health, 400);
        assert_eq!(psythic.modifiers.current_health, 400.0);
        assert!((psythic.modifiers.size - 0.7).abs() < 1e-6);
        assert_eq!(psythic.profile.as_ref().map(|p| p.name.as_str()), Some("Psythic_full"));

        let xray = mode.bot(RosterBot::Xray).expect("xray");
        assert!(host.has_weapon(xray, WeaponItem::Lazer));
        assert_eq!(host.player(xray).expect("xray").guard_target, Some(psythic.id));
    }

    #[test]
    fn transform_boosts_only_the_starting_players() {
        let config = UjiriConfig {
            transform_players: true,
            ..UjiriConfig::default()
        };
        let mut host = ujiri_host(10);
        let starters: Vec<EntityId> = host.players().iter().map(|p| p.id).collect();
        let mut mode = UjiriMode::new(config, 5);
        host.start(&mut mode);

        let first = host.player(starters[0]).expect("first").modifiers;
        assert!((first.run_speed - 1.15 * 1.35).abs() < 1e-5);
        assert_eq!(first.max_energy, 120);
        let second = host.player(starters[1]).expect("second").modifiers;
        assert!((second.size - 1.12).abs() < 1e-6);
        assert!((second.sprint_speed - 0.95 * 1.45).abs() < 1e-5);
        for id in &starters {
            assert!(host.has_weapon(*id, WeaponItem::Grenades));
            assert!(host.has_weapon(*id, WeaponItem::Pistol));
        }

        let timpa = mode.bot(RosterBot::Timpa).expect("timpa");
        assert!(!host.has_weapon(timpa, WeaponItem::Pistol));
    }
}
