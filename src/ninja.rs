use serde::{Deserialize, Serialize};

use crate::abilities::{Susano, SusanoTransition, SusanoTuning};
use crate::constants::{
    NINJA_INFINITE_AMMO_COMMAND, NINJA_REMOVED_TAGS, NINJA_UPDATE_MS, UCHIHA_SLOWMO_INTERVAL_MS,
};
use crate::host::{resolve_alive, strip_weapons, Host};
use crate::mode::GameMode;
use crate::profiles;
use crate::scheduler::TimerRegistry;
use crate::types::{
    AbilityKind, DamageArgs, EntityId, Gender, ModeEvent, PlayerSnapshot, Profile, TimerId,
    WeaponItem,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NinjaConfig {
    pub update_ms: u64,
    /// Index into the startup player list of the Uchiha, if any.
    pub uchiha_slot: Option<usize>,
    pub slowmo_interval_ms: u64,
    pub susano: SusanoTuning,
}

impl Default for NinjaConfig {
    fn default() -> Self {
        Self {
            update_ms: NINJA_UPDATE_MS,
            uchiha_slot: Some(0),
            slowmo_interval_ms: UCHIHA_SLOWMO_INTERVAL_MS,
            susano: SusanoTuning::default(),
        }
    }
}

/// Shuriken and bow for everyone; elite bots get the katana, the rest a knife.
pub fn ninja_loadout(player: &PlayerSnapshot) -> [WeaponItem; 3] {
    let elite = player.bot && player.behavior.ai.is_some_and(|ai| ai.is_elite());
    let blade = if elite {
        WeaponItem::Katana
    } else {
        WeaponItem::Knife
    };
    [WeaponItem::Shuriken, WeaponItem::Bow, blade]
}

pub struct NinjaMode {
    config: NinjaConfig,
    timers: TimerRegistry<NinjaMode>,
    uchiha: Option<EntityId>,
    susano: Susano,
    saved_profile: Option<Profile>,
    events: Vec<ModeEvent>,
}

impl NinjaMode {
    pub fn new(config: NinjaConfig) -> Self {
        Self {
            config,
            timers: TimerRegistry::new(),
            uchiha: None,
            susano: Susano::default(),
            saved_profile: None,
            events: Vec::new(),
        }
    }

    pub fn uchiha(&self) -> Option<EntityId> {
        self.uchiha
    }

    pub fn susano(&self) -> Susano {
        self.susano
    }

    fn equip(&self, host: &mut dyn Host, player: &PlayerSnapshot) {
        strip_weapons(host, player.id);
        for weapon in ninja_loadout(player) {
            host.give_weapon(player.id, weapon);
        }
    }

    fn give_uchiha_slowmo(&mut self, host: &mut dyn Host) {
        let Some(uchiha) = self.uchiha.and_then(|id| resolve_alive(host, id)) else {
            return;
        };
        host.give_weapon(uchiha.id, WeaponItem::Slowmo5);
        self.events.push(ModeEvent::AbilityUsed {
            entity: uchiha.id,
            ability: AbilityKind::Slowmo,
        });
    }

    fn step_susano(&mut self, host: &mut dyn Host) {
        let Some(uchiha) = self.uchiha.and_then(|id| resolve_alive(host, id)) else {
            return;
        };
        let Some(transition) =
            self.susano
                .step(&uchiha.modifiers, host.now_ms(), &self.config.susano)
        else {
            return;
        };
        match transition {
            SusanoTransition::Manifest(armored) => {
                host.set_modifiers(uchiha.id, &armored);
                let gender = uchiha
                    .profile
                    .as_ref()
                    .map_or(Gender::Male, |profile| profile.gender);
                self.saved_profile = uchiha.profile;
                host.set_profile(uchiha.id, &profiles::susano_profile(gender));
                self.events.push(ModeEvent::AbilityUsed {
                    entity: uchiha.id,
                    ability: AbilityKind::Susano,
                });
                self.events.push(ModeEvent::SusanoChanged {
                    entity: uchiha.id,
                    manifested: true,
                });
            }
            SusanoTransition::Dismiss(restored) => {
                host.set_modifiers(uchiha.id, &restored);
                if let Some(profile) = self.saved_profile.take() {
                    host.set_profile(uchiha.id, &profile);
                }
                self.events.push(ModeEvent::SusanoChanged {
                    entity: uchiha.id,
                    manifested: false,
                });
            }
            SusanoTransition::Recovered => {}
        }
    }
}

impl GameMode for NinjaMode {
    fn name(&self) -> &'static str {
        "ninja"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.susano = Susano::default();
        self.saved_profile = None;

        host.run_command(NINJA_INFINITE_AMMO_COMMAND);
        for tag in NINJA_REMOVED_TAGS {
            host.remove_objects(tag);
        }
        let players = host.players();
        for player in &players {
            self.equip(host, player);
        }

        self.uchiha = self
            .config
            .uchiha_slot
            .and_then(|slot| players.get(slot))
            .map(|player| player.id);
        if self.uchiha.is_some() {
            self.give_uchiha_slowmo(host);
            self.timers.register_repeating(
                host,
                "GiveUchihaSlowmo",
                self.config.slowmo_interval_ms,
                Self::give_uchiha_slowmo,
            );
        }
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn on_player_spawned(&mut self, player: EntityId, host: &mut dyn Host) {
        if let Some(spawned) = host.player(player) {
            self.equip(host, &spawned);
        }
    }

    fn on_player_damage(&mut self, player: EntityId, _args: DamageArgs, host: &mut dyn Host) {
        if Some(player) == self.uchiha {
            self.step_susano(host);
        }
    }

    fn on_update(&mut self, _elapsed_ms: u64, host: &mut dyn Host) {
        self.step_susano(host);
    }

    fn update_interval_ms(&self) -> Option<u64> {
        Some(self.config.update_ms)
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}
