use std::collections::BTreeMap;

use crate::host::{resolve_alive, Host};
use crate::types::EntityId;

/// Per-target stun deadlines. Input comes back only for targets whose own
/// deadline has passed.
#[derive(Clone, Debug, Default)]
pub struct StunBook {
    until: BTreeMap<EntityId, u64>,
}

impl StunBook {
    /// Disables input until `now + duration_ms`. A longer running stun wins.
    pub fn stun(&mut self, host: &mut dyn Host, id: EntityId, duration_ms: u64) {
        let until = host.now_ms() + duration_ms;
        host.set_input_enabled(id, false);
        let deadline = self.until.entry(id).or_insert(until);
        *deadline = (*deadline).max(until);
    }

    /// Stun plus a forced fall.
    pub fn knock_out(&mut self, host: &mut dyn Host, id: EntityId, duration_ms: u64) {
        self.stun(host, id, duration_ms);
        host.knock_down(id);
    }

    pub fn is_stunned(&self, id: EntityId, now_ms: u64) -> bool {
        self.until.get(&id).is_some_and(|until| now_ms < *until)
    }

    pub fn len(&self) -> usize {
        self.until.len()
    }

    pub fn is_empty(&self) -> bool {
        self.until.is_empty()
    }

    /// Re-enables input for expired stuns on living targets and forgets
    /// every expired entry.
    pub fn release_expired(&mut self, host: &mut dyn Host) -> Vec<EntityId> {
        let now = host.now_ms();
        let expired: Vec<EntityId> = self
            .until
            .iter()
            .filter(|(_, until)| now >= **until)
            .map(|(id, _)| *id)
            .collect();
        let mut released = Vec::new();
        for id in expired {
            self.until.remove(&id);
            if resolve_alive(host, id).is_some() {
                host.set_input_enabled(id, true);
                released.push(id);
            }
        }
        released
    }

    pub fn clear(&mut self) {
        self.until.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::GameMode;
    use crate::sim::SimHost;
    use crate::types::{Team, TimerId, Vec2};

    struct Idle;

    impl GameMode for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn on_startup(&mut self, _host: &mut dyn Host) {}

        fn on_timer(&mut self, _timer: TimerId, _name: &str, _host: &mut dyn Host) -> bool {
            false
        }
    }

    #[test]
    fn release_only_touches_expired_targets() {
        let mut host = SimHost::new(3);
        let short = host.add_player(Team::Team1, true, Vec2::ZERO);
        let long = host.add_player(Team::Team2, true, Vec2::ZERO);
        let mut book = StunBook::default();
        book.stun(&mut host, short, 500);
        book.knock_out(&mut host, long, 2_000);
        assert_eq!(host.knockdowns(long), 1);

        host.advance(&mut Idle, 600);
        assert_eq!(book.release_expired(&mut host), vec![short]);
        assert!(host.input_enabled(short));
        assert!(!host.input_enabled(long));
        assert!(book.is_stunned(long, host.now()));

        host.advance(&mut Idle, 1_400);
        assert_eq!(book.release_expired(&mut host), vec![long]);
        assert!(book.is_empty());
    }

    #[test]
    fn dead_targets_stay_disabled() {
        let mut host = SimHost::new(3);
        let target = host.add_player(Team::Team1, true, Vec2::ZERO);
        let mut book = StunBook::default();
        book.stun(&mut host, target, 500);
        host.force_dead(target);

        host.advance(&mut Idle, 500);
        assert!(book.release_expired(&mut host).is_empty());
        assert!(!host.input_enabled(target));
        assert!(book.is_empty());
    }

    #[test]
    fn longer_stun_wins() {
        let mut host = SimHost::new(3);
        let target = host.add_player(Team::Team1, true, Vec2::ZERO);
        let mut book = StunBook::default();
        book.stun(&mut host, target, 2_000);
        book.stun(&mut host, target, 500);

        host.advance(&mut Idle, 1_000);
        assert!(book.release_expired(&mut host).is_empty());
        assert!(book.is_stunned(target, host.now()));
    }
}
