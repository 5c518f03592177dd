use serde::{Deserialize, Serialize};

use crate::constants::{COOP_EARLY_DEATH_MS, COOP_HUMAN_CHECK_MS, GAME_OVER_COMMAND};
use crate::host::Host;
use crate::mode::GameMode;
use crate::scheduler::TimerRegistry;
use crate::types::{EntityId, ModeEvent, TimerId};

pub const EARLY_DEATH_MESSAGE: &str = "Human player died too early. Restarting game...";
pub const NO_HUMANS_MESSAGE: &str = "No human players remaining. Restarting game...";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoopConfig {
    pub early_death_window_ms: u64,
    pub human_check_interval_ms: u64,
}

impl Default for CoopConfig {
    fn default() -> Self {
        Self {
            early_death_window_ms: COOP_EARLY_DEATH_MS,
            human_check_interval_ms: COOP_HUMAN_CHECK_MS,
        }
    }
}

/// Ends a cooperative round as soon as the humans are out of it.
pub struct CoopMode {
    config: CoopConfig,
    timers: TimerRegistry<CoopMode>,
    started_at_ms: u64,
    triggered: bool,
    events: Vec<ModeEvent>,
}

impl CoopMode {
    pub fn new(config: CoopConfig) -> Self {
        Self {
            config,
            timers: TimerRegistry::new(),
            started_at_ms: 0,
            triggered: false,
            events: Vec::new(),
        }
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    fn restart(&mut self, host: &mut dyn Host, message: &str) {
        if self.triggered {
            return;
        }
        self.triggered = true;
        host.show_popup(message);
        host.run_command("slowmo 0");
        host.run_command(GAME_OVER_COMMAND);
        self.events.push(ModeEvent::RestartRequested {
            message: message.to_string(),
        });
    }

    fn check_for_human_players(&mut self, host: &mut dyn Host) {
        if self.triggered {
            return;
        }
        let players = host.players();
        if players.is_empty() || players.iter().any(|player| player.human() && player.alive()) {
            return;
        }
        self.restart(host, NO_HUMANS_MESSAGE);
    }
}

impl GameMode for CoopMode {
    fn name(&self) -> &'static str {
        "coop"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.started_at_ms = host.now_ms();
        self.triggered = false;
        self.timers.register_repeating(
            host,
            "CheckForHumanPlayers",
            self.config.human_check_interval_ms,
            Self::check_for_human_players,
        );
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn on_player_spawned(&mut self, _player: EntityId, host: &mut dyn Host) {
        self.triggered = false;
        self.started_at_ms = host.now_ms();
    }

    fn on_player_death(&mut self, player: EntityId, host: &mut dyn Host) {
        if self.triggered {
            return;
        }
        let Some(dead) = host.player(player) else {
            return;
        };
        if !dead.human() {
            return;
        }
        if host.now_ms().saturating_sub(self.started_at_ms) <= self.config.early_death_window_ms {
            self.restart(host, EARLY_DEATH_MESSAGE);
        }
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}
