use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::abilities::{Cooldown, Hunger, StunBook};
use crate::constants::{
    BICHI_DRONE_INTERVAL_MS, EDUR_MAX_SPEED, EDUR_MIN_SIZE, KOKOLA_MINION_DAMAGE,
    KOKOLA_MINION_HEALTH, KOKOLA_MINION_INTERVAL_MS, KOKOLA_MINION_SIZE, PAKHI_REGEN_AMOUNT,
    PAKHI_REGEN_INTERVAL_MS, PSYTHIC_FULL_DURATION_MS, PSYTHIC_FULL_HEALTH_FACTOR,
    PSYTHIC_GIB_PERCENT, PSYTHIC_STUN_MS, PSYTHIC_STUN_PERCENT, TIMPA_BOOST_MS,
    TIMPA_KILL_WINDOW_MS, TIMPA_LOW_HEALTH_RATIO, UJIRI_UPDATE_MS, XRAY_LASER_INTERVAL_MS,
};
use crate::host::{resolve_alive, Host};
use crate::mode::GameMode;
use crate::profiles;
use crate::rng::Rng;
use crate::scheduler::TimerRegistry;
use crate::types::{
    AiType, DamageArgs, EntityId, MeleeHit, ModeEvent, PlayerSnapshot, Profile, Team, TimerId,
};

mod psythic_system;
mod roster_system;
mod support_system;

pub use self::roster_system::team_anchors;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UjiriConfig {
    pub update_ms: u64,
    pub timpa_kill_window_ms: u64,
    pub timpa_boost_ms: u64,
    pub timpa_low_health_ratio: f32,
    pub bichi_drone_interval_ms: u64,
    pub kokola_minion_interval_ms: u64,
    pub minion_health: i32,
    pub minion_size: f32,
    pub minion_damage: f32,
    pub edur_min_size: f32,
    pub edur_max_speed: f32,
    pub xray_laser_interval_ms: u64,
    pub pakhi_regen_interval_ms: u64,
    pub pakhi_regen_amount: f32,
    pub psythic_full_ms: u64,
    pub psythic_full_health_factor: i32,
    pub psythic_gib_percent: u32,
    pub psythic_stun_percent: u32,
    pub psythic_stun_ms: u64,
    /// Gives the starting players the speed and sidearm boosts.
    pub transform_players: bool,
}

impl Default for UjiriConfig {
    fn default() -> Self {
        Self {
            update_ms: UJIRI_UPDATE_MS,
            timpa_kill_window_ms: TIMPA_KILL_WINDOW_MS,
            timpa_boost_ms: TIMPA_BOOST_MS,
            timpa_low_health_ratio: TIMPA_LOW_HEALTH_RATIO,
            bichi_drone_interval_ms: BICHI_DRONE_INTERVAL_MS,
            kokola_minion_interval_ms: KOKOLA_MINION_INTERVAL_MS,
            minion_health: KOKOLA_MINION_HEALTH,
            minion_size: KOKOLA_MINION_SIZE,
            minion_damage: KOKOLA_MINION_DAMAGE,
            edur_min_size: EDUR_MIN_SIZE,
            edur_max_speed: EDUR_MAX_SPEED,
            xray_laser_interval_ms: XRAY_LASER_INTERVAL_MS,
            pakhi_regen_interval_ms: PAKHI_REGEN_INTERVAL_MS,
            pakhi_regen_amount: PAKHI_REGEN_AMOUNT,
            psythic_full_ms: PSYTHIC_FULL_DURATION_MS,
            psythic_full_health_factor: PSYTHIC_FULL_HEALTH_FACTOR,
            psythic_gib_percent: PSYTHIC_GIB_PERCENT,
            psythic_stun_percent: PSYTHIC_STUN_PERCENT,
            psythic_stun_ms: PSYTHIC_STUN_MS,
            transform_players: false,
        }
    }
}

/// The seven named ability bots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RosterBot {
    Timpa,
    Bichi,
    Kokola,
    Edur,
    Xray,
    Pakhi,
    Psythic,
}

impl RosterBot {
    pub const ALL: [RosterBot; 7] = [
        RosterBot::Timpa,
        RosterBot::Bichi,
        RosterBot::Kokola,
        RosterBot::Edur,
        RosterBot::Xray,
        RosterBot::Pakhi,
        RosterBot::Psythic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RosterBot::Timpa => "Timpa",
            RosterBot::Bichi => "Bichi",
            RosterBot::Kokola => "Kokola",
            RosterBot::Edur => "Edur",
            RosterBot::Xray => "Xray",
            RosterBot::Pakhi => "Pakhi",
            RosterBot::Psythic => "Psythic",
        }
    }

    pub fn team(self) -> Team {
        match self {
            RosterBot::Timpa | RosterBot::Bichi | RosterBot::Kokola => Team::Team1,
            _ => Team::Team2,
        }
    }

    pub fn ai(self) -> AiType {
        match self {
            RosterBot::Timpa | RosterBot::Bichi | RosterBot::Kokola => AiType::BotD,
            RosterBot::Edur | RosterBot::Xray | RosterBot::Pakhi => AiType::CompanionA,
            RosterBot::Psythic => AiType::ZombieB,
        }
    }

    pub fn profile(self) -> Profile {
        match self {
            RosterBot::Timpa => profiles::timpa_profile(),
            RosterBot::Bichi => profiles::bichi_profile(),
            RosterBot::Kokola => profiles::kokola_profile(),
            RosterBot::Edur => profiles::edur_profile(),
            RosterBot::Xray => profiles::xray_profile(),
            RosterBot::Pakhi => profiles::pakhi_profile(),
            RosterBot::Psythic => profiles::psythic_full_profile(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct AbilityClocks {
    bichi: Cooldown,
    kokola: Cooldown,
    xray: Cooldown,
    pakhi: Cooldown,
}

impl AbilityClocks {
    fn start(config: &UjiriConfig, now_ms: u64) -> Self {
        Self {
            bichi: Cooldown::new(config.bichi_drone_interval_ms, now_ms),
            kokola: Cooldown::new(config.kokola_minion_interval_ms, now_ms),
            xray: Cooldown::new(config.xray_laser_interval_ms, now_ms),
            pakhi: Cooldown::new(config.pakhi_regen_interval_ms, now_ms),
        }
    }
}

/// Per-round state. Rebuilt on every startup.
#[derive(Clone, Debug)]
struct UjiriRound {
    rng: Rng,
    roster: BTreeMap<RosterBot, EntityId>,
    hunger: Hunger,
    psythic_base_health: i32,
    edur_base_size: f32,
    timpa_hits: BTreeMap<EntityId, u64>,
    clocks: AbilityClocks,
    stuns: StunBook,
}

impl UjiriRound {
    fn new(seed: u32, config: &UjiriConfig, now_ms: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            roster: BTreeMap::new(),
            hunger: Hunger::full(now_ms),
            psythic_base_health: 100,
            edur_base_size: 1.0,
            timpa_hits: BTreeMap::new(),
            clocks: AbilityClocks::start(config, now_ms),
            stuns: StunBook::default(),
        }
    }
}

pub struct UjiriMode {
    config: UjiriConfig,
    seed: u32,
    rounds_started: u32,
    timers: TimerRegistry<UjiriMode>,
    round: UjiriRound,
    events: Vec<ModeEvent>,
}

impl UjiriMode {
    pub fn new(config: UjiriConfig, seed: u32) -> Self {
        let round = UjiriRound::new(seed, &config, 0);
        Self {
            config,
            seed,
            rounds_started: 0,
            timers: TimerRegistry::new(),
            round,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &UjiriConfig {
        &self.config
    }

    pub fn bot(&self, which: RosterBot) -> Option<EntityId> {
        self.round.roster.get(&which).copied()
    }

    pub fn hunger(&self) -> Hunger {
        self.round.hunger
    }

    /// Roster bot alive right now, re-read from the host.
    fn live_bot(&self, host: &dyn Host, which: RosterBot) -> Option<PlayerSnapshot> {
        self.bot(which).and_then(|id| resolve_alive(host, id))
    }

    fn round_seed(&self) -> u32 {
        self.seed.wrapping_add(self.rounds_started.wrapping_mul(0x9e37_79b9))
    }
}

impl GameMode for UjiriMode {
    fn name(&self) -> &'static str {
        "ujiri"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.round = UjiriRound::new(self.round_seed(), &self.config, host.now_ms());
        self.rounds_started += 1;

        let starters: Vec<EntityId> = host.players().iter().map(|player| player.id).collect();
        self.spawn_roster(host);
        if self.config.transform_players {
            self.transform_starters(host, &starters);
        }
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn on_player_damage(&mut self, player: EntityId, args: DamageArgs, host: &mut dyn Host) {
        if args.source.is_some() && args.source == self.bot(RosterBot::Timpa) {
            self.round.timpa_hits.insert(player, host.now_ms());
        }
        if Some(player) == self.bot(RosterBot::Pakhi) {
            self.pakhi_lifesteal(host, args);
        }
    }

    fn on_player_death(&mut self, player: EntityId, host: &mut dyn Host) {
        self.credit_timpa_kill(host, player);
    }

    fn on_melee_action(&mut self, attacker: EntityId, hits: &[MeleeHit], host: &mut dyn Host) {
        if hits.is_empty() || Some(attacker) != self.bot(RosterBot::Psythic) {
            return;
        }
        self.psythic_bites(host, hits);
    }

    fn on_update(&mut self, _elapsed_ms: u64, host: &mut dyn Host) {
        let now = host.now_ms();
        self.forget_stale_timpa_hits(now);
        self.timpa_rage(host);
        self.bichi_drones(host);
        self.kokola_minions(host);
        self.edur_scaling(host);
        self.xray_laser(host);
        self.pakhi_regen(host);
        self.psythic_hunger(host);
    }

    fn update_interval_ms(&self) -> Option<u64> {
        Some(self.config.update_ms)
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}
