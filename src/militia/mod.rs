use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARTILLERY_FIRE_AMMO_INTERVAL_MS, ARTILLERY_INTERVAL_MS, CAPTAIN_INTERVAL_MS, COLONEL_HEALTH,
    DRONE_INTERVAL_MS, IDENTIFY_COLONELS_DELAY_MS, LEAD_PLAYER_RESISTANCE,
    RESPAWN_DRAIN_INTERVAL_MS, ROOKIE_INTERVAL_MS, WINNER_CHECK_INTERVAL_MS,
};
use crate::host::{resolve_alive, update_modifiers, Host};
use crate::mode::GameMode;
use crate::rng::Rng;
use crate::scheduler::{TimerHandler, TimerRegistry};
use crate::types::{EntityId, ModeEvent, RoundOutcome, Team, TimerId, Visibility};

mod colonel_system;
mod escort_system;
mod respawn_system;
mod specialist_system;
mod utils;
mod victory_system;

pub use self::colonel_system::ColonelState;
pub use self::escort_system::{EscortRegistry, EscortTuning};
pub use self::respawn_system::{RespawnQueue, RespawnRecord};
pub use self::specialist_system::{resolve_specialist_weapon, SpecialistLedger};
pub use self::utils::{outcome_message, team_corner};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MilitiaConfig {
    pub rookie_interval_ms: u64,
    pub captain_interval_ms: u64,
    pub artillery_interval_ms: u64,
    pub drone_interval_ms: u64,
    pub respawn_interval_ms: u64,
    pub winner_check_interval_ms: u64,
    pub artillery_fire_ammo_interval_ms: u64,
    pub identify_colonels_delay_ms: u64,
    pub colonel_health: i32,
    pub lead_player_resistance: f32,
    pub escorts: EscortTuning,
}

impl Default for MilitiaConfig {
    fn default() -> Self {
        Self {
            rookie_interval_ms: ROOKIE_INTERVAL_MS,
            captain_interval_ms: CAPTAIN_INTERVAL_MS,
            artillery_interval_ms: ARTILLERY_INTERVAL_MS,
            drone_interval_ms: DRONE_INTERVAL_MS,
            respawn_interval_ms: RESPAWN_DRAIN_INTERVAL_MS,
            winner_check_interval_ms: WINNER_CHECK_INTERVAL_MS,
            artillery_fire_ammo_interval_ms: ARTILLERY_FIRE_AMMO_INTERVAL_MS,
            identify_colonels_delay_ms: IDENTIFY_COLONELS_DELAY_MS,
            colonel_health: COLONEL_HEALTH,
            lead_player_resistance: LEAD_PLAYER_RESISTANCE,
            escorts: EscortTuning::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Ended(RoundOutcome),
}

/// Everything that lives for exactly one round. Rebuilt on every startup.
#[derive(Clone, Debug)]
pub struct RoundState {
    rng: Rng,
    ledgers: BTreeMap<Team, SpecialistLedger>,
    colonels: BTreeMap<Team, EntityId>,
    escorts: EscortRegistry,
    respawns: RespawnQueue,
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
            ledgers: BTreeMap::new(),
            colonels: BTreeMap::new(),
            escorts: EscortRegistry::default(),
            respawns: RespawnQueue::default(),
            phase: RoundPhase::Running,
        }
    }

    pub fn ended(&self) -> bool {
        matches!(self.phase, RoundPhase::Ended(_))
    }
}

pub struct MilitiaMode {
    config: MilitiaConfig,
    seed: u32,
    rounds_started: u32,
    timers: TimerRegistry<MilitiaMode>,
    round: RoundState,
    events: Vec<ModeEvent>,
}

impl MilitiaMode {
    pub fn new(config: MilitiaConfig, seed: u32) -> Self {
        Self {
            config,
            seed,
            rounds_started: 0,
            timers: TimerRegistry::new(),
            round: RoundState::new(seed),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &MilitiaConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn ledger(&self, team: Team) -> SpecialistLedger {
        self.round.ledgers.get(&team).copied().unwrap_or_default()
    }

    pub fn escorts(&self) -> &EscortRegistry {
        &self.round.escorts
    }

    pub fn respawns(&self) -> &RespawnQueue {
        &self.round.respawns
    }

    pub fn timer_names(&self) -> Vec<&'static str> {
        self.timers.names().collect()
    }

    fn round_seed(&self) -> u32 {
        self.seed.wrapping_add(self.rounds_started.wrapping_mul(0x9e37_79b9))
    }

    fn register_timers(&mut self, host: &mut dyn Host) {
        let config = &self.config;
        let repeating: [(&'static str, u64, TimerHandler<Self>); 7] = [
            ("SpawnRookies", config.rookie_interval_ms, Self::spawn_rookies),
            ("SpawnCaptains", config.captain_interval_ms, Self::spawn_captains),
            ("SpawnArtillerys", config.artillery_interval_ms, Self::spawn_artillerys),
            ("SpawnDrones", config.drone_interval_ms, Self::spawn_drones),
            ("ProcessRespawnQueue", config.respawn_interval_ms, Self::process_respawn_queue),
            ("CheckForWinner", config.winner_check_interval_ms, Self::check_for_winner),
            (
                "GiveArtilleryFireAmmo",
                config.artillery_fire_ammo_interval_ms,
                Self::give_artillery_fire_ammo,
            ),
        ];
        let identify_delay = config.identify_colonels_delay_ms;
        for (name, interval_ms, handler) in repeating {
            self.timers.register_repeating(host, name, interval_ms, handler);
        }
        self.timers
            .register_once(host, "IdentifyColonels", identify_delay, Self::identify_colonels);
    }

    /// Player #1 shrugs off some projectile damage and player #2 some melee.
    fn apply_lead_resistances(&self, host: &mut dyn Host) {
        let players = host.players();
        let [first, second, ..] = players.as_slice() else {
            return;
        };
        let resistance = self.config.lead_player_resistance;
        update_modifiers(host, first.id, |mods| mods.projectile_damage_taken *= resistance);
        update_modifiers(host, second.id, |mods| mods.melee_damage_taken *= resistance);
    }
}

impl GameMode for MilitiaMode {
    fn name(&self) -> &'static str {
        "militia"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.round = RoundState::new(self.round_seed());
        self.rounds_started += 1;
        self.register_timers(host);

        for player in host.players() {
            if !player.alive() {
                continue;
            }
            self.equip_loadout(host, player.id, true);
            if player.bot {
                host.set_visibility(player.id, Visibility::HIDDEN);
            }
        }
        self.apply_lead_resistances(host);
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn on_player_spawned(&mut self, player: EntityId, host: &mut dyn Host) {
        if resolve_alive(host, player).is_some() {
            self.equip_loadout(host, player, true);
        }
    }

    fn on_player_death(&mut self, player: EntityId, host: &mut dyn Host) {
        self.queue_respawn(host, player);
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use crate::types::{EscortTier, Vec2, WeaponItem};

    pub(super) fn militia_host(teams: &[Team], per_team: usize, humans: usize) -> SimHost {
        let mut host = SimHost::new(17).with_map(
            vec![Vec2::new(0.0, 0.0), Vec2::new(400.0, 0.0)],
            vec![Vec2::new(100.0, 50.0), Vec2::new(300.0, -20.0)],
        );
        let mut placed = 0;
        for (index, team) in teams.iter().enumerate() {
            for slot in 0..per_team {
                let bot = placed >= humans;
                let position = Vec2::new(index as f32 * 100.0, slot as f32 * 10.0);
                host.add_player(*team, bot, position);
                placed += 1;
            }
        }
        host
    }

    #[test]
    fn startup_registers_every_named_timer() {
        let mut host = militia_host(&[Team::Team1, Team::Team2], 2, 1);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 3);
        host.start(&mut mode);

        let mut names = host.active_timer_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "CheckForWinner",
                "GiveArtilleryFireAmmo",
                "IdentifyColonels",
                "ProcessRespawnQueue",
                "SpawnArtillerys",
                "SpawnCaptains",
                "SpawnDrones",
                "SpawnRookies",
            ]
        );
        assert_eq!(mode.timer_names().len(), 8);
    }

    #[test]
    fn startup_equips_hides_bots_and_applies_lead_resistances() {
        let mut host = militia_host(&[Team::Team1, Team::Team2], 2, 1);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 3);
        host.start(&mut mode);

        let players = host.players();
        for player in &players {
            assert!(host.has_weapon(player.id, WeaponItem::Grenades));
            if player.bot {
                assert_eq!(player.visibility, Visibility::HIDDEN);
                assert!(player.profile.is_some());
            } else {
                assert_eq!(player.visibility, Visibility::SHOWN);
            }
        }
        assert!((players[0].modifiers.projectile_damage_taken - 0.8).abs() < 1e-6);
        assert!((players[0].modifiers.melee_damage_taken - 1.0).abs() < 1e-6);
        assert!((players[1].modifiers.melee_damage_taken - 0.8).abs() < 1e-6);
    }

    #[test]
    fn single_player_round_skips_lead_resistances() {
        let mut host = militia_host(&[Team::Team1], 1, 1);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 3);
        host.start(&mut mode);

        let players = host.players();
        assert!((players[0].modifiers.projectile_damage_taken - 1.0).abs() < 1e-6);
    }

    #[test]
    fn same_seed_replays_the_same_round() {
        let run = |seed: u32| {
            let mut host = militia_host(&[Team::Team1, Team::Team2], 4, 2);
            let mut mode = MilitiaMode::new(MilitiaConfig::default(), seed);
            host.start(&mut mode);
            host.advance(&mut mode, 13_000);
            let mut events = mode.drain_events();
            events.retain(|event| matches!(event, ModeEvent::SpecialistAssigned { .. }));
            events
        };
        assert_eq!(run(41), run(41));
    }

    #[test]
    fn restart_builds_a_fresh_round() {
        let mut host = militia_host(&[Team::Team1, Team::Team2], 2, 1);
        let mut mode = MilitiaMode::new(MilitiaConfig::default(), 3);
        host.start(&mut mode);
        host.advance(&mut mode, 6_500);
        assert!(mode.escorts().count(EscortTier::Rookie) > 0);

        host.start(&mut mode);

        assert_eq!(mode.escorts().count(EscortTier::Rookie), 0);
        assert_eq!(mode.phase(), RoundPhase::Running);
        assert_eq!(host.active_timer_names().len(), 8);
    }
}
