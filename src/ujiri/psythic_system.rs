use super::*;

use crate::abilities::Bite;
use crate::host::update_modifiers;
use crate::types::AbilityKind;

impl UjiriMode {
    pub(super) fn psythic_bites(&mut self, host: &mut dyn Host, hits: &[MeleeHit]) {
        let Some(psythic) = self.live_bot(host, RosterBot::Psythic) else {
            return;
        };
        let gib_percent = self.config.psythic_gib_percent;
        let stun_percent = self.config.psythic_stun_percent;
        for hit in hits.iter().filter(|hit| hit.is_player) {
            let Some(victim) = resolve_alive(host, hit.target) else {
                continue;
            };
            if victim.team == psythic.team {
                continue;
            }
            match self
                .round
                .hunger
                .bite(&mut self.round.rng, gib_percent, stun_percent)
            {
                Bite::Gib => {
                    let meal = victim.modifiers.current_health;
                    host.gib(victim.id);
                    update_modifiers(host, psythic.id, |mods| mods.heal(meal));
                    self.events.push(ModeEvent::AbilityUsed {
                        entity: psythic.id,
                        ability: AbilityKind::Gib,
                    });
                    self.feed_psythic(host);
                }
                Bite::Stun => self.knock_out(host, victim.id),
                Bite::Glance => {}
            }
        }
    }

    fn knock_out(&mut self, host: &mut dyn Host, id: EntityId) {
        let duration = self.config.psythic_stun_ms;
        self.round.stuns.knock_out(host, id, duration);
        self.timers
            .register_once(host, "RestorePlayerMovement", duration, Self::restore_player_movement);
    }

    fn restore_player_movement(&mut self, host: &mut dyn Host) {
        self.round.stuns.release_expired(host);
    }

    fn feed_psythic(&mut self, host: &mut dyn Host) {
        if self.round.hunger.feed(host.now_ms()) {
            self.enter_full(host);
        }
    }

    pub(super) fn psythic_hunger(&mut self, host: &mut dyn Host) {
        if self.live_bot(host, RosterBot::Psythic).is_none() {
            return;
        }
        if self
            .round
            .hunger
            .tick(host.now_ms(), self.config.psythic_full_ms)
        {
            self.enter_hungry(host);
        }
    }

    /// Stats only change here and in `enter_hungry`, once per transition.
    fn enter_full(&mut self, host: &mut dyn Host) {
        let Some(psythic) = self.live_bot(host, RosterBot::Psythic) else {
            return;
        };
        let boosted = self.round.psythic_base_health * self.config.psythic_full_health_factor;
        host.set_profile(psythic.id, &profiles::psythic_full_profile());
        update_modifiers(host, psythic.id, |mods| mods.rescale_max_health(boosted));
        let guard = self.live_bot(host, RosterBot::Xray).map(|xray| xray.id);
        if guard.is_some() {
            host.set_guard_target(psythic.id, guard);
        }
        self.events.push(ModeEvent::HungerChanged {
            entity: psythic.id,
            hungry: false,
        });
    }

    fn enter_hungry(&mut self, host: &mut dyn Host) {
        let Some(psythic) = self.live_bot(host, RosterBot::Psythic) else {
            return;
        };
        let base = self.round.psythic_base_health;
        host.set_profile(psythic.id, &profiles::psythic_hungry_profile());
        update_modifiers(host, psythic.id, |mods| mods.rescale_max_health(base));
        host.set_guard_target(psythic.id, None);
        self.events.push(ModeEvent::HungerChanged {
            entity: psythic.id,
            hungry: true,
        });
    }
}
