use crate::rng::Rng;

/// Boss appetite. Time turns it hungry; only a successful gib feeds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hunger {
    Full { since: u64 },
    Hungry,
}

/// Outcome of one bite against a valid target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bite {
    Gib,
    Stun,
    Glance,
}

impl Hunger {
    pub fn full(now_ms: u64) -> Self {
        Hunger::Full { since: now_ms }
    }

    pub fn is_hungry(&self) -> bool {
        matches!(self, Hunger::Hungry)
    }

    /// Returns true only on the tick that flips `Full` into `Hungry`.
    pub fn tick(&mut self, now_ms: u64, full_duration_ms: u64) -> bool {
        match *self {
            Hunger::Full { since } if now_ms.saturating_sub(since) >= full_duration_ms => {
                *self = Hunger::Hungry;
                true
            }
            _ => false,
        }
    }

    /// Returns true only when a hungry boss becomes full.
    pub fn feed(&mut self, now_ms: u64) -> bool {
        if !self.is_hungry() {
            return false;
        }
        *self = Hunger::full(now_ms);
        true
    }

    /// Rolls a bite. A full boss can never gib.
    pub fn bite(&self, rng: &mut Rng, gib_percent: u32, stun_percent: u32) -> Bite {
        if self.is_hungry() && rng.percent(gib_percent) {
            return Bite::Gib;
        }
        if rng.percent(stun_percent) {
            Bite::Stun
        } else {
            Bite::Glance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goes_hungry_once_after_the_full_window() {
        let mut hunger = Hunger::full(1_000);
        assert!(!hunger.tick(10_999, 10_000));
        assert!(hunger.tick(11_000, 10_000));
        assert!(!hunger.tick(12_000, 10_000));
        assert!(hunger.is_hungry());
    }

    #[test]
    fn feeding_only_changes_a_hungry_boss() {
        let mut hunger = Hunger::full(0);
        assert!(!hunger.feed(500));
        assert_eq!(hunger, Hunger::Full { since: 0 });

        hunger.tick(10_000, 10_000);
        assert!(hunger.feed(12_000));
        assert_eq!(hunger, Hunger::Full { since: 12_000 });
    }

    #[test]
    fn full_boss_never_gibs() {
        let hunger = Hunger::full(0);
        let mut rng = Rng::new(5);
        for _ in 0..500 {
            assert_ne!(hunger.bite(&mut rng, 100, 85), Bite::Gib);
        }
    }

    #[test]
    fn hungry_boss_rolls_every_outcome() {
        let hunger = Hunger::Hungry;
        let mut rng = Rng::new(5);
        let mut seen = [false; 3];
        for _ in 0..500 {
            match hunger.bite(&mut rng, 40, 85) {
                Bite::Gib => seen[0] = true,
                Bite::Stun => seen[1] = true,
                Bite::Glance => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }
}
