use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOT_REGEN_COOLDOWN_MS, BOT_REGEN_DELAY_MS, BOT_REGEN_PERCENT, HUMAN_REGEN_COOLDOWN_MS,
    HUMAN_REGEN_DELAY_MS, HUMAN_REGEN_PERCENT, REGEN_UPDATE_MS,
};
use crate::host::{update_modifiers, Host};
use crate::mode::GameMode;
use crate::types::{DamageArgs, EntityId, MeleeHit, PlayerSnapshot, TimerId};

/// How one class of player earns health back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegenSchedule {
    /// Quiet time after the last hit given or taken.
    pub cooldown_ms: u64,
    /// Time the player must stay eligible before the first heal.
    pub delay_ms: u64,
    /// Fraction of max health per tick, truncated to whole points.
    pub percent: f32,
    pub requires_full_energy: bool,
}

impl RegenSchedule {
    pub fn human() -> Self {
        Self {
            cooldown_ms: HUMAN_REGEN_COOLDOWN_MS,
            delay_ms: HUMAN_REGEN_DELAY_MS,
            percent: HUMAN_REGEN_PERCENT,
            requires_full_energy: true,
        }
    }

    pub fn bot() -> Self {
        Self {
            cooldown_ms: BOT_REGEN_COOLDOWN_MS,
            delay_ms: BOT_REGEN_DELAY_MS,
            percent: BOT_REGEN_PERCENT,
            requires_full_energy: false,
        }
    }

    pub fn amount(&self, max_health: i32) -> i32 {
        (max_health as f32 * self.percent) as i32
    }
}

impl Default for RegenSchedule {
    fn default() -> Self {
        Self::human()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegenConfig {
    pub update_ms: u64,
    pub human: RegenSchedule,
    pub bot: RegenSchedule,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            update_ms: REGEN_UPDATE_MS,
            human: RegenSchedule::human(),
            bot: RegenSchedule::bot(),
        }
    }
}

/// Out-of-combat health regeneration, tracked per entity.
#[derive(Clone, Debug, Default)]
pub struct RegenEngine {
    config: RegenConfig,
    last_combat_ms: BTreeMap<EntityId, u64>,
    ready_since_ms: BTreeMap<EntityId, u64>,
}

impl RegenEngine {
    pub fn new(config: RegenConfig) -> Self {
        Self {
            config,
            last_combat_ms: BTreeMap::new(),
            ready_since_ms: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &RegenConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.last_combat_ms.clear();
        self.ready_since_ms.clear();
    }

    pub fn mark_combat(&mut self, id: EntityId, now_ms: u64) {
        self.last_combat_ms.insert(id, now_ms);
        self.ready_since_ms.remove(&id);
    }

    pub fn last_combat(&self, id: EntityId) -> Option<u64> {
        self.last_combat_ms.get(&id).copied()
    }

    fn schedule_for(&self, player: &PlayerSnapshot) -> RegenSchedule {
        if player.bot {
            self.config.bot
        } else {
            self.config.human
        }
    }

    /// One regeneration pass. Returns the players healed and by how much.
    pub fn tick(&mut self, host: &mut dyn Host) -> Vec<(EntityId, i32)> {
        let players = host.players();
        if players.len() < 2 {
            return Vec::new();
        }
        let now = host.now_ms();
        self.last_combat_ms
            .retain(|id, _| players.iter().any(|player| player.id == *id && player.alive()));
        let mut healed = Vec::new();
        for player in players {
            if !player.alive() {
                self.ready_since_ms.remove(&player.id);
                continue;
            }
            let schedule = self.schedule_for(&player);
            let in_combat = self
                .last_combat(player.id)
                .is_some_and(|at| now.saturating_sub(at) < schedule.cooldown_ms);
            let drained = schedule.requires_full_energy && !player.modifiers.energy_full();
            if in_combat || drained {
                self.ready_since_ms.remove(&player.id);
                continue;
            }

            let since = *self.ready_since_ms.entry(player.id).or_insert(now);
            if now.saturating_sub(since) < schedule.delay_ms {
                continue;
            }
            let mods = player.modifiers;
            let amount = schedule.amount(mods.max_health);
            if amount <= 0 || mods.current_health >= mods.max_health as f32 {
                continue;
            }
            update_modifiers(host, player.id, |mods| mods.heal(amount as f32));
            healed.push((player.id, amount));
        }
        healed
    }
}

/// Standalone regeneration layer, stackable under any other mode.
pub struct RegenMode {
    engine: RegenEngine,
}

impl RegenMode {
    pub fn new(config: RegenConfig) -> Self {
        Self {
            engine: RegenEngine::new(config),
        }
    }

    pub fn engine(&self) -> &RegenEngine {
        &self.engine
    }
}

impl GameMode for RegenMode {
    fn name(&self) -> &'static str {
        "regen"
    }

    fn on_startup(&mut self, _host: &mut dyn Host) {
        self.engine.reset();
    }

    fn on_timer(&mut self, _timer: TimerId, _name: &str, _host: &mut dyn Host) -> bool {
        false
    }

    fn on_player_damage(&mut self, player: EntityId, _args: DamageArgs, host: &mut dyn Host) {
        self.engine.mark_combat(player, host.now_ms());
    }

    fn on_melee_action(&mut self, attacker: EntityId, _hits: &[MeleeHit], host: &mut dyn Host) {
        self.engine.mark_combat(attacker, host.now_ms());
    }

    fn on_update(&mut self, _elapsed_ms: u64, host: &mut dyn Host) {
        self.engine.tick(host);
    }

    fn update_interval_ms(&self) -> Option<u64> {
        Some(self.engine.config.update_ms)
    }
}
