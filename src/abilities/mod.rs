mod hunger;
mod jump_shock;
mod stun;
mod susano;

pub use self::hunger::{Bite, Hunger};
pub use self::jump_shock::{Charge, JumpShock, Vulnerability};
pub use self::stun::StunBook;
pub use self::susano::{Susano, SusanoTransition, SusanoTuning};

/// Fixed-interval gate measured on the host clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    interval_ms: u64,
    last_ms: u64,
}

impl Cooldown {
    /// Starts counting from `now_ms`, so the first fire is one interval away.
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: now_ms,
        }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_ms) >= self.interval_ms
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if !self.ready(now_ms) {
            return false;
        }
        self.restart(now_ms);
        true
    }
}
