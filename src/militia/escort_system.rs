use std::collections::BTreeSet;

use super::*;

use crate::constants::{
    ARTILLERY_EXPLOSION_TAKEN, ARTILLERY_FIRE_TAKEN, ARTILLERY_HEALTH, ARTILLERY_IMPACT_TAKEN,
    ARTILLERY_MELEE_TAKEN, ARTILLERY_PROJECTILE_DEALT, ARTILLERY_PROJECTILE_TAKEN,
    ARTILLERY_SIZE, ARTILLERY_SPEED, CAPTAIN_DAMAGE_MULTIPLIER, CAPTAIN_HEALTH,
    ROOKIE_DAMAGE_MULTIPLIER, ROOKIE_HEALTH, ROOKIE_SIZE,
};
use crate::profiles::{artillery_profile, captain_profile, rookie_profile};
use crate::types::{
    AiType, BehaviorSet, BotBehavior, CameraFocus, DroneWeapon, EscortTier, Modifiers, Vec2,
    WeaponItem,
};

/// Ids of every escort spawned this round, per tier. Anything in here is
/// left out of main-player accounting.
#[derive(Clone, Debug, Default)]
pub struct EscortRegistry {
    rookies: BTreeSet<EntityId>,
    captains: BTreeSet<EntityId>,
    artillery: BTreeSet<EntityId>,
    drones: BTreeSet<EntityId>,
}

impl EscortRegistry {
    fn tier_mut(&mut self, tier: EscortTier) -> &mut BTreeSet<EntityId> {
        match tier {
            EscortTier::Rookie => &mut self.rookies,
            EscortTier::Captain => &mut self.captains,
            EscortTier::Artillery => &mut self.artillery,
            EscortTier::Drone => &mut self.drones,
        }
    }

    pub fn ids(&self, tier: EscortTier) -> &BTreeSet<EntityId> {
        match tier {
            EscortTier::Rookie => &self.rookies,
            EscortTier::Captain => &self.captains,
            EscortTier::Artillery => &self.artillery,
            EscortTier::Drone => &self.drones,
        }
    }

    pub fn record(&mut self, tier: EscortTier, id: EntityId) {
        self.tier_mut(tier).insert(id);
    }

    pub fn tier_of(&self, id: EntityId) -> Option<EscortTier> {
        [
            EscortTier::Rookie,
            EscortTier::Captain,
            EscortTier::Artillery,
            EscortTier::Drone,
        ]
        .into_iter()
        .find(|tier| self.ids(*tier).contains(&id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.tier_of(id).is_some()
    }

    pub fn count(&self, tier: EscortTier) -> usize {
        self.ids(tier).len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EscortTuning {
    pub rookie_health: i32,
    pub rookie_size: f32,
    pub rookie_damage: f32,
    pub captain_health: i32,
    pub captain_damage: f32,
    pub artillery_health: i32,
    pub artillery_speed: f32,
    pub artillery_size: f32,
    pub artillery_projectile_dealt: f32,
    pub artillery_fire_taken: f32,
    pub artillery_projectile_taken: f32,
    pub artillery_melee_taken: f32,
    pub artillery_impact_taken: f32,
    pub artillery_explosion_taken: f32,
}

impl Default for EscortTuning {
    fn default() -> Self {
        Self {
            rookie_health: ROOKIE_HEALTH,
            rookie_size: ROOKIE_SIZE,
            rookie_damage: ROOKIE_DAMAGE_MULTIPLIER,
            captain_health: CAPTAIN_HEALTH,
            captain_damage: CAPTAIN_DAMAGE_MULTIPLIER,
            artillery_health: ARTILLERY_HEALTH,
            artillery_speed: ARTILLERY_SPEED,
            artillery_size: ARTILLERY_SIZE,
            artillery_projectile_dealt: ARTILLERY_PROJECTILE_DEALT,
            artillery_fire_taken: ARTILLERY_FIRE_TAKEN,
            artillery_projectile_taken: ARTILLERY_PROJECTILE_TAKEN,
            artillery_melee_taken: ARTILLERY_MELEE_TAKEN,
            artillery_impact_taken: ARTILLERY_IMPACT_TAKEN,
            artillery_explosion_taken: ARTILLERY_EXPLOSION_TAKEN,
        }
    }
}

impl EscortTuning {
    /// Fresh stat bag for a tier. Drones are objects and keep host defaults.
    pub fn modifiers(&self, tier: EscortTier) -> Modifiers {
        match tier {
            EscortTier::Rookie => Modifiers {
                size: self.rookie_size,
                melee_damage_dealt: self.rookie_damage,
                projectile_damage_dealt: self.rookie_damage,
                ..Modifiers::with_health(self.rookie_health)
            },
            EscortTier::Captain => Modifiers {
                melee_damage_dealt: self.captain_damage,
                projectile_damage_dealt: self.captain_damage,
                ..Modifiers::with_health(self.captain_health)
            },
            EscortTier::Artillery => Modifiers {
                run_speed: self.artillery_speed,
                sprint_speed: self.artillery_speed,
                size: self.artillery_size,
                projectile_damage_dealt: self.artillery_projectile_dealt,
                fire_damage_taken: self.artillery_fire_taken,
                projectile_damage_taken: self.artillery_projectile_taken,
                melee_damage_taken: self.artillery_melee_taken,
                impact_damage_taken: self.artillery_impact_taken,
                explosion_damage_taken: self.artillery_explosion_taken,
                melee_stun_immunity: true,
                infinite_ammo: true,
                drops_items: false,
                ..Modifiers::with_health(self.artillery_health)
            },
            EscortTier::Drone => Modifiers::default(),
        }
    }
}

impl MilitiaMode {
    pub(super) fn spawn_rookies(&mut self, host: &mut dyn Host) {
        self.spawn_escort_wave(host, EscortTier::Rookie);
    }

    pub(super) fn spawn_captains(&mut self, host: &mut dyn Host) {
        self.spawn_escort_wave(host, EscortTier::Captain);
    }

    pub(super) fn spawn_artillerys(&mut self, host: &mut dyn Host) {
        self.spawn_escort_wave(host, EscortTier::Artillery);
    }

    pub(super) fn spawn_drones(&mut self, host: &mut dyn Host) {
        self.spawn_escort_wave(host, EscortTier::Drone);
    }

    /// One escort of `tier` for every team whose colonel is alive right now.
    fn spawn_escort_wave(&mut self, host: &mut dyn Host, tier: EscortTier) {
        if self.round.ended() {
            return;
        }
        let teams: Vec<Team> = self.round.colonels.keys().copied().collect();
        for team in teams {
            if self.live_colonel(host, team).is_none() {
                continue;
            }
            self.spawn_escort(host, team, tier);
        }
    }

    /// At the live colonel, otherwise at the team's map corner.
    pub(super) fn spawn_position(&mut self, host: &dyn Host, team: Team) -> Vec2 {
        match self.live_colonel(host, team) {
            Some(colonel) => colonel.position,
            None => team_corner(host, team, &mut self.round.rng),
        }
    }

    pub(super) fn spawn_escort(
        &mut self,
        host: &mut dyn Host,
        team: Team,
        tier: EscortTier,
    ) -> Option<EntityId> {
        let position = self.spawn_position(host, team);
        let created = match tier {
            EscortTier::Drone => host.create_drone(position, DroneWeapon::MachineGun, team, None),
            _ => host.create_player(position),
        };
        let Some(id) = created else {
            eprintln!("[militia] host refused to create a {tier:?} escort for {team:?}");
            return None;
        };
        self.round.escorts.record(tier, id);
        if tier != EscortTier::Drone {
            self.outfit_escort(host, team, tier, id);
        }
        self.events
            .push(ModeEvent::EscortSpawned { team, tier, entity: id });
        Some(id)
    }

    fn outfit_escort(&self, host: &mut dyn Host, team: Team, tier: EscortTier, id: EntityId) {
        host.set_visibility(id, Visibility::HIDDEN);
        host.set_camera_focus(id, CameraFocus::Ignore);
        host.set_team(id, team);
        host.set_modifiers(id, &self.config.escorts.modifiers(tier));

        let colonel = self.live_colonel(host, team).map(|colonel| colonel.id);
        match tier {
            EscortTier::Rookie => {
                host.set_bot_behavior(id, BotBehavior::bot(AiType::BotD));
                host.set_guard_target(id, colonel);
                host.give_weapon(id, WeaponItem::Pistol);
                host.give_weapon(id, WeaponItem::Grenades);
                host.set_profile(id, &rookie_profile(team));
            }
            EscortTier::Captain => {
                host.set_bot_behavior(id, BotBehavior::bot(AiType::BotC));
                host.set_guard_target(id, colonel);
                host.give_weapon(id, WeaponItem::Pistol);
                host.give_weapon(id, WeaponItem::Knife);
                host.give_weapon(id, WeaponItem::Grenades);
                host.set_profile(id, &captain_profile(team));
            }
            EscortTier::Artillery => {
                host.set_bot_behavior(id, BotBehavior::bot(AiType::BotA));
                host.set_behavior_set(
                    id,
                    BehaviorSet {
                        search_items: 0.0,
                        melee_usage: false,
                    },
                );
                host.give_weapon(id, WeaponItem::GrenadeLauncher);
                host.give_weapon(id, WeaponItem::FireAmmo);
                host.set_profile(id, &artillery_profile(team));
            }
            EscortTier::Drone => {}
        }
    }

    pub(super) fn give_artillery_fire_ammo(&mut self, host: &mut dyn Host) {
        if self.round.ended() {
            return;
        }
        for id in self.round.escorts.ids(EscortTier::Artillery) {
            if resolve_alive(host, *id).is_some() {
                host.give_weapon(*id, WeaponItem::FireAmmo);
            }
        }
    }
}
