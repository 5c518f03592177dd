use serde::{Deserialize, Serialize};

use crate::constants::{
    SUSANO_DAMAGE_TAKEN, SUSANO_DURATION_MS, SUSANO_HEALTH_RATIO, SUSANO_MELEE_DEALT,
    SUSANO_RECOVERY_MS, SUSANO_SIZE,
};
use crate::types::Modifiers;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SusanoTuning {
    pub health_ratio: f32,
    pub duration_ms: u64,
    pub recovery_ms: u64,
    pub size: f32,
    pub damage_taken: f32,
    pub melee_dealt: f32,
}

impl Default for SusanoTuning {
    fn default() -> Self {
        Self {
            health_ratio: SUSANO_HEALTH_RATIO,
            duration_ms: SUSANO_DURATION_MS,
            recovery_ms: SUSANO_RECOVERY_MS,
            size: SUSANO_SIZE,
            damage_taken: SUSANO_DAMAGE_TAKEN,
            melee_dealt: SUSANO_MELEE_DEALT,
        }
    }
}

impl SusanoTuning {
    fn armored(&self, base: &Modifiers) -> Modifiers {
        Modifiers {
            size: self.size,
            melee_damage_taken: base.melee_damage_taken * self.damage_taken,
            projectile_damage_taken: base.projectile_damage_taken * self.damage_taken,
            fire_damage_taken: base.fire_damage_taken * self.damage_taken,
            impact_damage_taken: base.impact_damage_taken * self.damage_taken,
            explosion_damage_taken: base.explosion_damage_taken * self.damage_taken,
            melee_damage_dealt: base.melee_damage_dealt * self.melee_dealt,
            ..*base
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Susano {
    #[default]
    Ready,
    Manifested { until: u64, saved: Modifiers },
    Recovering { until: u64 },
}

/// Modifiers the caller must push to the host for a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SusanoTransition {
    Manifest(Modifiers),
    Dismiss(Modifiers),
    Recovered,
}

impl Susano {
    pub fn manifested(&self) -> bool {
        matches!(self, Susano::Manifested { .. })
    }

    /// Advances the transform against the owner's live modifiers. At most one
    /// transition happens per call.
    pub fn step(
        &mut self,
        current: &Modifiers,
        now_ms: u64,
        tuning: &SusanoTuning,
    ) -> Option<SusanoTransition> {
        match *self {
            Susano::Ready => {
                if current.current_health <= 0.0 || current.health_ratio() > tuning.health_ratio {
                    return None;
                }
                *self = Susano::Manifested {
                    until: now_ms + tuning.duration_ms,
                    saved: *current,
                };
                Some(SusanoTransition::Manifest(tuning.armored(current)))
            }
            Susano::Manifested { until, saved } => {
                if now_ms < until {
                    return None;
                }
                *self = Susano::Recovering {
                    until: now_ms + tuning.recovery_ms,
                };
                // Health and energy are whatever the fight left.
                let restored = Modifiers {
                    max_health: current.max_health,
                    current_health: current.current_health,
                    max_energy: current.max_energy,
                    current_energy: current.current_energy,
                    ..saved
                };
                Some(SusanoTransition::Dismiss(restored))
            }
            Susano::Recovering { until } => {
                if now_ms < until {
                    return None;
                }
                *self = Susano::Ready;
                Some(SusanoTransition::Recovered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wounded(health: f32) -> Modifiers {
        Modifiers {
            current_health: health,
            ..Modifiers::default()
        }
    }

    #[test]
    fn healthy_owner_never_manifests() {
        let mut susano = Susano::default();
        let tuning = SusanoTuning::default();
        assert_eq!(susano.step(&wounded(31.0), 0, &tuning), None);
        assert_eq!(susano.step(&wounded(0.0), 0, &tuning), None);
        assert_eq!(susano, Susano::Ready);
    }

    #[test]
    fn full_cycle_applies_and_restores_stats_once() {
        let mut susano = Susano::default();
        let tuning = SusanoTuning::default();
        let base = Modifiers {
            melee_damage_taken: 0.8,
            ..wounded(30.0)
        };

        let Some(SusanoTransition::Manifest(armored)) = susano.step(&base, 1_000, &tuning) else {
            panic!("expected manifest");
        };
        assert!((armored.size - 1.3).abs() < 1e-6);
        assert!((armored.melee_damage_taken - 0.4).abs() < 1e-6);
        assert!((armored.explosion_damage_taken - 0.5).abs() < 1e-6);
        assert!((armored.melee_damage_dealt - 1.5).abs() < 1e-6);
        assert!(susano.manifested());

        let during = Modifiers {
            current_health: 12.0,
            ..armored
        };
        assert_eq!(susano.step(&during, 10_999, &tuning), None);

        let Some(SusanoTransition::Dismiss(restored)) = susano.step(&during, 11_000, &tuning)
        else {
            panic!("expected dismiss");
        };
        assert!((restored.size - 1.0).abs() < 1e-6);
        assert!((restored.melee_damage_taken - 0.8).abs() < 1e-6);
        assert!((restored.current_health - 12.0).abs() < 1e-6);
        assert_eq!(susano, Susano::Recovering { until: 41_000 });

        assert_eq!(susano.step(&restored, 40_000, &tuning), None);
        assert_eq!(
            susano.step(&restored, 41_000, &tuning),
            Some(SusanoTransition::Recovered)
        );
        assert_eq!(susano, Susano::Ready);
    }
}
