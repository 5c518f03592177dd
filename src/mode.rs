use crate::host::Host;
use crate::types::{DamageArgs, EntityId, KeyInput, MeleeHit, ModeEvent, TimerId};

/// Entry points the host invokes on a mode. Every callback runs to completion
/// before the host moves on, so a mode never observes itself mid-update.
pub trait GameMode {
    fn name(&self) -> &'static str;

    fn on_startup(&mut self, host: &mut dyn Host);

    /// Dispatches a named timer. Returns false when this mode did not start
    /// the timer or has no handler under that name.
    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool;

    fn on_player_spawned(&mut self, _player: EntityId, _host: &mut dyn Host) {}

    fn on_player_death(&mut self, _player: EntityId, _host: &mut dyn Host) {}

    fn on_player_damage(&mut self, _player: EntityId, _args: DamageArgs, _host: &mut dyn Host) {}

    fn on_melee_action(&mut self, _attacker: EntityId, _hits: &[MeleeHit], _host: &mut dyn Host) {
    }

    fn on_key_input(&mut self, _player: EntityId, _input: KeyInput, _host: &mut dyn Host) {}

    fn on_update(&mut self, _elapsed_ms: u64, _host: &mut dyn Host) {}

    /// Cadence of `on_update`, or `None` when the mode has no update loop.
    fn update_interval_ms(&self) -> Option<u64> {
        None
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        Vec::new()
    }
}

/// Several modes sharing one match, each seeing every callback in order.
#[derive(Default)]
pub struct ModeStack {
    modes: Vec<Box<dyn GameMode>>,
    elapsed_since_update: Vec<u64>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mode: Box<dyn GameMode>) -> Self {
        self.push(mode);
        self
    }

    pub fn push(&mut self, mode: Box<dyn GameMode>) {
        self.modes.push(mode);
        self.elapsed_since_update.push(0);
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Greatest common cadence of the stacked update loops.
    fn tick_ms(&self) -> Option<u64> {
        self.modes
            .iter()
            .filter_map(|mode| mode.update_interval_ms())
            .filter(|interval| *interval > 0)
            .reduce(gcd)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl GameMode for ModeStack {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        for (mode, elapsed) in self.modes.iter_mut().zip(self.elapsed_since_update.iter_mut()) {
            *elapsed = 0;
            mode.on_startup(host);
        }
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        // Timer ids are unique per host, so at most one mode claims it.
        self.modes
            .iter_mut()
            .any(|mode| mode.on_timer(timer, name, host))
    }

    fn on_player_spawned(&mut self, player: EntityId, host: &mut dyn Host) {
        for mode in &mut self.modes {
            mode.on_player_spawned(player, host);
        }
    }

    fn on_player_death(&mut self, player: EntityId, host: &mut dyn Host) {
        for mode in &mut self.modes {
            mode.on_player_death(player, host);
        }
    }

    fn on_player_damage(&mut self, player: EntityId, args: DamageArgs, host: &mut dyn Host) {
        for mode in &mut self.modes {
            mode.on_player_damage(player, args, host);
        }
    }

    fn on_melee_action(&mut self, attacker: EntityId, hits: &[MeleeHit], host: &mut dyn Host) {
        for mode in &mut self.modes {
            mode.on_melee_action(attacker, hits, host);
        }
    }

    fn on_key_input(&mut self, player: EntityId, input: KeyInput, host: &mut dyn Host) {
        for mode in &mut self.modes {
            mode.on_key_input(player, input, host);
        }
    }

    fn on_update(&mut self, elapsed_ms: u64, host: &mut dyn Host) {
        for (mode, elapsed) in self.modes.iter_mut().zip(self.elapsed_since_update.iter_mut()) {
            let Some(interval) = mode.update_interval_ms() else {
                continue;
            };
            *elapsed += elapsed_ms;
            if *elapsed >= interval {
                mode.on_update(*elapsed, host);
                *elapsed = 0;
            }
        }
    }

    fn update_interval_ms(&self) -> Option<u64> {
        self.tick_ms()
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        self.modes
            .iter_mut()
            .flat_map(|mode| mode.drain_events())
            .collect()
    }
}
