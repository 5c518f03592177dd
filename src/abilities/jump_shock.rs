#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charge {
    Empty,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vulnerability {
    Steady,
    Exposed { until: u64 },
}

/// Aerial shock plus the melee combo that rides along with it.
///
/// The charge is a single slot: granting while `Ready` is a no-op, so charges
/// never bank. Triggering empties the slot and exposes the caster for
/// `exposure_ms`. The combo counter fires every `combo_threshold` connecting
/// swings and loses one step per quiet update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpShock {
    charge: Charge,
    vulnerability: Vulnerability,
    combo: u32,
    combo_threshold: u32,
    exposure_ms: u64,
}

impl JumpShock {
    pub fn new(combo_threshold: u32, exposure_ms: u64) -> Self {
        Self {
            charge: Charge::Empty,
            vulnerability: Vulnerability::Steady,
            combo: 0,
            combo_threshold: combo_threshold.max(1),
            exposure_ms,
        }
    }

    pub fn charge(&self) -> Charge {
        self.charge
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn grant_charge(&mut self) {
        self.charge = Charge::Ready;
    }

    pub fn has_charge(&self) -> bool {
        self.charge == Charge::Ready
    }

    /// Spends the charge if the caster is airborne. Returns true when the
    /// shock goes off.
    pub fn try_trigger(&mut self, airborne: bool, now_ms: u64) -> bool {
        if !airborne || self.charge != Charge::Ready {
            return false;
        }
        self.charge = Charge::Empty;
        self.vulnerability = Vulnerability::Exposed {
            until: now_ms + self.exposure_ms,
        };
        true
    }

    pub fn exposed(&self, now_ms: u64) -> bool {
        matches!(self.vulnerability, Vulnerability::Exposed { until } if now_ms < until)
    }

    /// Drops an exposure window that has run out.
    pub fn settle(&mut self, now_ms: u64) {
        if let Vulnerability::Exposed { until } = self.vulnerability {
            if now_ms >= until {
                self.vulnerability = Vulnerability::Steady;
            }
        }
    }

    /// Counts a connecting melee swing. Returns true on the swing that
    /// completes the combo, which also resets the counter.
    pub fn record_melee_hit(&mut self) -> bool {
        self.combo += 1;
        if self.combo >= self.combo_threshold {
            self.combo = 0;
            return true;
        }
        false
    }

    pub fn decay_combo(&mut self) {
        self.combo = self.combo.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_does_not_bank() {
        let mut shock = JumpShock::new(3, 3_000);
        shock.grant_charge();
        shock.grant_charge();
        assert!(shock.try_trigger(true, 100));
        assert!(!shock.try_trigger(true, 200));
        assert_eq!(shock.charge(), Charge::Empty);
    }

    #[test]
    fn grounded_caster_keeps_the_charge() {
        let mut shock = JumpShock::new(3, 3_000);
        shock.grant_charge();
        assert!(!shock.try_trigger(false, 100));
        assert!(shock.has_charge());
        assert_eq!(shock.vulnerability(), Vulnerability::Steady);
    }

    #[test]
    fn trigger_opens_an_exposure_window() {
        let mut shock = JumpShock::new(3, 3_000);
        shock.grant_charge();
        assert!(shock.try_trigger(true, 10_000));
        assert_eq!(
            shock.vulnerability(),
            Vulnerability::Exposed { until: 13_000 }
        );
        assert!(shock.exposed(12_999));
        assert!(!shock.exposed(13_000));

        shock.settle(12_000);
        assert!(shock.exposed(12_500));
        shock.settle(13_000);
        assert_eq!(shock.vulnerability(), Vulnerability::Steady);
    }

    #[test]
    fn combo_fires_every_third_hit_and_decays() {
        let mut shock = JumpShock::new(3, 3_000);
        assert!(!shock.record_melee_hit());
        assert!(!shock.record_melee_hit());
        assert!(shock.record_melee_hit());
        assert_eq!(shock.combo(), 0);

        shock.record_melee_hit();
        shock.record_melee_hit();
        shock.decay_combo();
        assert_eq!(shock.combo(), 1);
        shock.decay_combo();
        shock.decay_combo();
        assert_eq!(shock.combo(), 0);
        assert!(!shock.record_melee_hit());
    }
}
