use std::collections::BTreeMap;

use crate::host::Host;
use crate::types::{Repeat, TimerId};

pub type TimerHandler<M> = fn(&mut M, &mut dyn Host);

/// Name-keyed dispatch table for host timers. The host only knows timer names;
/// the registry maps each name back to a typed handler on the owning mode and
/// remembers which timer ids belong to it until their last firing.
pub struct TimerRegistry<M> {
    handlers: BTreeMap<&'static str, TimerHandler<M>>,
    active: BTreeMap<TimerId, Repeat>,
}

impl<M> Default for TimerRegistry<M> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
            active: BTreeMap::new(),
        }
    }
}

impl<M> TimerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_repeating(
        &mut self,
        host: &mut dyn Host,
        name: &'static str,
        interval_ms: u64,
        handler: TimerHandler<M>,
    ) -> TimerId {
        self.register(host, name, interval_ms, Repeat::Forever, handler)
    }

    pub fn register_once(
        &mut self,
        host: &mut dyn Host,
        name: &'static str,
        delay_ms: u64,
        handler: TimerHandler<M>,
    ) -> TimerId {
        self.register(host, name, delay_ms, Repeat::Times(1), handler)
    }

    fn register(
        &mut self,
        host: &mut dyn Host,
        name: &'static str,
        interval_ms: u64,
        repeat: Repeat,
        handler: TimerHandler<M>,
    ) -> TimerId {
        self.handlers.insert(name, handler);
        let id = host.start_timer(name, interval_ms, repeat);
        self.active.insert(id, repeat);
        id
    }

    /// Handler for a fired timer, if the timer was started through this registry.
    /// A counted timer is forgotten on its last firing.
    pub fn resolve(&mut self, timer: TimerId, name: &str) -> Option<TimerHandler<M>> {
        let handler = self.handlers.get(name).copied()?;
        match self.active.get_mut(&timer)? {
            Repeat::Forever => {}
            Repeat::Times(remaining) if *remaining > 1 => *remaining -= 1,
            Repeat::Times(_) => {
                self.active.remove(&timer);
            }
        }
        Some(handler)
    }

    pub fn cancel_all(&mut self, host: &mut dyn Host) {
        for id in std::mem::take(&mut self.active).into_keys() {
            host.stop_timer(id);
        }
        self.handlers.clear();
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;

    #[derive(Default)]
    struct Counter {
        timers: TimerRegistry<Counter>,
        ticks: u32,
        once: u32,
    }

    fn fire(counter: &mut Counter, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = counter.timers.resolve(timer, name) else {
            return false;
        };
        handler(counter, host);
        true
    }

    fn tick(counter: &mut Counter, _host: &mut dyn Host) {
        counter.ticks += 1;
    }

    fn once(counter: &mut Counter, _host: &mut dyn Host) {
        counter.once += 1;
    }

    #[test]
    fn dispatch_runs_the_handler_registered_under_the_name() {
        let mut host = SimHost::new(1);
        let mut counter = Counter::default();
        let id = counter
            .timers
            .register_repeating(&mut host, "Tick", 1_000, tick);

        assert!(fire(&mut counter, id, "Tick", &mut host));
        assert!(fire(&mut counter, id, "Tick", &mut host));
        assert_eq!(counter.ticks, 2);
    }

    #[test]
    fn unknown_name_or_foreign_timer_is_a_no_op() {
        let mut host = SimHost::new(1);
        let mut counter = Counter::default();
        let id = counter.timers.register_once(&mut host, "Once", 500, once);

        assert!(!fire(&mut counter, id, "Missing", &mut host));
        assert!(!fire(&mut counter, TimerId(id.0 + 100), "Once", &mut host));
        assert_eq!(counter.once, 0);
    }

    #[test]
    fn cancel_all_stops_every_host_timer() {
        let mut host = SimHost::new(1);
        let mut counter = Counter::default();
        let id = counter
            .timers
            .register_repeating(&mut host, "Tick", 1_000, tick);
        counter.timers.register_once(&mut host, "Once", 500, once);
        assert_eq!(host.active_timer_names().len(), 2);

        counter.timers.cancel_all(&mut host);

        assert!(host.active_timer_names().is_empty());
        assert!(counter.timers.is_empty());
        assert!(!fire(&mut counter, id, "Tick", &mut host));
    }

    #[test]
    fn one_shot_timers_are_forgotten_after_firing() {
        let mut host = SimHost::new(1);
        let mut counter = Counter::default();
        counter
            .timers
            .register_repeating(&mut host, "Tick", 1_000, tick);
        let mut fired = Vec::new();
        for _ in 0..1_000 {
            let id = counter.timers.register_once(&mut host, "Once", 500, once);
            assert!(fire(&mut counter, id, "Once", &mut host));
            fired.push(id);
        }

        assert_eq!(counter.once, 1_000);
        assert_eq!(counter.timers.active_len(), 1);
        assert!(!fire(&mut counter, fired[0], "Once", &mut host));
        assert_eq!(counter.once, 1_000);
    }

    #[test]
    fn counted_timers_resolve_until_exhausted() {
        let mut host = SimHost::new(1);
        let mut counter = Counter::default();
        let id = counter
            .timers
            .register(&mut host, "Tick", 100, Repeat::Times(2), tick);

        assert!(fire(&mut counter, id, "Tick", &mut host));
        assert!(fire(&mut counter, id, "Tick", &mut host));
        assert!(!fire(&mut counter, id, "Tick", &mut host));
        assert_eq!(counter.ticks, 2);
        assert!(counter.timers.is_empty());
    }
}
