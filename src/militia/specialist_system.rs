use super::*;

use crate::constants::SPECIALIST_KIND_COUNT;
use crate::host::strip_weapons;
use crate::profiles::soldier_profiles;
use crate::roster;
use crate::types::{PlayerSnapshot, SpecialistKind, WeaponItem};

/// Per-team record of specialist items handed out this round: how many, and
/// which of the four kinds have appeared at least once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpecialistLedger {
    assigned: usize,
    covered: u8,
}

impl SpecialistLedger {
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    pub fn is_covered(&self, kind: SpecialistKind) -> bool {
        self.covered & (1 << kind.slot()) != 0
    }

    pub fn fully_covered(&self) -> bool {
        SpecialistKind::ALL.iter().all(|kind| self.is_covered(*kind))
    }

    pub fn uncovered(&self) -> Vec<SpecialistKind> {
        SpecialistKind::ALL
            .into_iter()
            .filter(|kind| !self.is_covered(*kind))
            .collect()
    }

    /// Picks the next kind for a team of `team_size`. Uncovered kinds come
    /// first; a team smaller than the kind count stops once every member got
    /// one. `None` means this call hands out nothing.
    pub fn choose(&mut self, team_size: usize, rng: &mut Rng) -> Option<SpecialistKind> {
        let kind = if team_size >= SPECIALIST_KIND_COUNT && self.fully_covered() {
            SpecialistKind::ALL[rng.pick_index(SPECIALIST_KIND_COUNT)]
        } else {
            if team_size < SPECIALIST_KIND_COUNT && self.assigned >= team_size {
                return None;
            }
            *rng.pick(&self.uncovered())?
        };
        self.covered |= 1 << kind.slot();
        self.assigned += 1;
        Some(kind)
    }
}

/// The heavy slot rolls between its two variants.
pub fn resolve_specialist_weapon(kind: SpecialistKind, rng: &mut Rng) -> WeaponItem {
    match kind {
        SpecialistKind::Shotgun => WeaponItem::Shotgun,
        SpecialistKind::Knife => WeaponItem::Knife,
        SpecialistKind::Heavy => {
            if rng.bool(0.5) {
                WeaponItem::Bazooka
            } else {
                WeaponItem::Sniper
            }
        }
        SpecialistKind::Smg => WeaponItem::Smg,
    }
}

impl MilitiaMode {
    /// Strips the four weapon slots, hands out grenades plus a specialist
    /// item, and dresses bots in a random team uniform.
    pub(super) fn equip_loadout(&mut self, host: &mut dyn Host, id: EntityId, dress_bot: bool) {
        let Some(player) = resolve_alive(host, id) else {
            return;
        };
        strip_weapons(host, id);
        host.give_weapon(id, WeaponItem::Grenades);
        self.assign_specialist_item(host, &player);

        if player.bot && dress_bot {
            let profiles = soldier_profiles(player.team);
            if let Some(profile) = self.round.rng.pick(&profiles) {
                host.set_profile(id, profile);
            }
        }
    }

    pub(super) fn assign_specialist_item(
        &mut self,
        host: &mut dyn Host,
        player: &PlayerSnapshot,
    ) -> Option<WeaponItem> {
        let team_size = roster::team_size(host, player.team);
        let ledger = self.round.ledgers.entry(player.team).or_default();
        let kind = ledger.choose(team_size, &mut self.round.rng)?;
        let weapon = resolve_specialist_weapon(kind, &mut self.round.rng);
        host.give_weapon(player.id, weapon);
        self.events.push(ModeEvent::SpecialistAssigned {
            team: player.team,
            entity: player.id,
            kind,
            weapon,
        });
        Some(weapon)
    }
}
