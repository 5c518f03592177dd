use serde::{Deserialize, Serialize};

use crate::abilities::{Cooldown, JumpShock, StunBook};
use crate::constants::{
    COMBO_SHOCK_DAMAGE, COMBO_SHOCK_STUN_MS, COMBO_THRESHOLD, JUGGERNAUT_ENERGY,
    JUGGERNAUT_HEALTH, JUGGERNAUT_MELEE_POWER, JUGGERNAUT_MELEE_TAKEN,
    JUGGERNAUT_PROJECTILE_TAKEN, JUGGERNAUT_SIZE, JUGGERNAUT_SPEED, JUMP_CHARGE_INTERVAL_MS,
    JUMP_SHOCK_DAMAGE, JUMP_SHOCK_STUN_MS, SHOCK_RANGE, SPLIT_DELAY_MS, SPLIT_GUARD_COUNT,
    STRIKER_CRIT_CHANCE, STRIKER_ENERGY, STRIKER_EXPLOSION_TAKEN, STRIKER_FIRE_AMMO_INTERVAL_MS,
    STRIKER_FIRE_TAKEN, STRIKER_PROJECTILE_TAKEN, STRIKER_RECHARGE, STRIKER_RUN_SPEED,
    STRIKER_SPRINT_SPEED, SUPERDS_UPDATE_MS, VULNERABILITY_EXTRA_DAMAGE, VULNERABILITY_MS,
};
use crate::host::{deal_damage, resolve_alive, update_modifiers, Host};
use crate::mode::GameMode;
use crate::regen::{RegenConfig, RegenEngine};
use crate::scheduler::{TimerHandler, TimerRegistry};
use crate::types::{
    AbilityKind, AiType, BotBehavior, CameraFocus, DamageArgs, Effect, EntityId, KeyEvent,
    KeyInput, MeleeHit, ModeEvent, Modifiers, TimerId, VirtualKey, Visibility, WeaponItem,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuperDsConfig {
    pub jump_charge_interval_ms: u64,
    pub fire_ammo_interval_ms: u64,
    pub pulse_ms: u64,
    pub shock_range: f32,
    pub jump_shock_damage: f32,
    pub jump_shock_stun_ms: u64,
    pub vulnerability_ms: u64,
    pub vulnerability_extra_damage: f32,
    pub combo_threshold: u32,
    pub combo_shock_damage: f32,
    pub combo_shock_stun_ms: u64,
    pub split_delay_ms: u64,
    pub split_guards: usize,
    pub regen: RegenConfig,
}

impl Default for SuperDsConfig {
    fn default() -> Self {
        Self {
            jump_charge_interval_ms: JUMP_CHARGE_INTERVAL_MS,
            fire_ammo_interval_ms: STRIKER_FIRE_AMMO_INTERVAL_MS,
            pulse_ms: SUPERDS_UPDATE_MS,
            shock_range: SHOCK_RANGE,
            jump_shock_damage: JUMP_SHOCK_DAMAGE,
            jump_shock_stun_ms: JUMP_SHOCK_STUN_MS,
            vulnerability_ms: VULNERABILITY_MS,
            vulnerability_extra_damage: VULNERABILITY_EXTRA_DAMAGE,
            combo_threshold: COMBO_THRESHOLD,
            combo_shock_damage: COMBO_SHOCK_DAMAGE,
            combo_shock_stun_ms: COMBO_SHOCK_STUN_MS,
            split_delay_ms: SPLIT_DELAY_MS,
            split_guards: SPLIT_GUARD_COUNT,
            regen: RegenConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitStage {
    Whole,
    Pending,
    Split,
}

impl SplitStage {
    fn index(self) -> u8 {
        match self {
            SplitStage::Whole => 0,
            SplitStage::Pending => 1,
            SplitStage::Split => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duelists {
    pub striker: EntityId,
    pub juggernaut: EntityId,
}

pub fn striker_modifiers(base: &Modifiers) -> Modifiers {
    Modifiers {
        run_speed: STRIKER_RUN_SPEED,
        sprint_speed: STRIKER_SPRINT_SPEED,
        projectile_damage_taken: base.projectile_damage_taken * STRIKER_PROJECTILE_TAKEN,
        explosion_damage_taken: base.explosion_damage_taken * STRIKER_EXPLOSION_TAKEN,
        fire_damage_taken: base.fire_damage_taken * STRIKER_FIRE_TAKEN,
        projectile_crit_chance_dealt: base.projectile_crit_chance_dealt * STRIKER_CRIT_CHANCE,
        max_energy: (base.max_energy as f32 * STRIKER_ENERGY) as i32,
        current_energy: (base.current_energy * STRIKER_ENERGY).trunc(),
        energy_recharge: base.energy_recharge * STRIKER_RECHARGE,
        ..*base
    }
}

/// The juggernaut's energy pool is sized off the striker's boosted one.
pub fn juggernaut_modifiers(base: &Modifiers, striker: &Modifiers) -> Modifiers {
    Modifiers {
        size: JUGGERNAUT_SIZE,
        run_speed: JUGGERNAUT_SPEED,
        sprint_speed: JUGGERNAUT_SPEED,
        max_energy: (striker.max_energy as f32 * JUGGERNAUT_ENERGY) as i32,
        current_energy: (striker.current_energy * JUGGERNAUT_ENERGY).trunc(),
        max_health: (base.max_health as f32 * JUGGERNAUT_HEALTH) as i32,
        current_health: (base.current_health * JUGGERNAUT_HEALTH).trunc(),
        melee_damage_taken: base.melee_damage_taken * JUGGERNAUT_MELEE_TAKEN,
        projectile_damage_taken: base.projectile_damage_taken * JUGGERNAUT_PROJECTILE_TAKEN,
        melee_force: base.melee_force * JUGGERNAUT_MELEE_POWER,
        melee_damage_dealt: base.melee_damage_dealt * JUGGERNAUT_MELEE_POWER,
        ..*base
    }
}

/// Asymmetric duel between player #1 and player #2.
pub struct SuperDsMode {
    config: SuperDsConfig,
    timers: TimerRegistry<SuperDsMode>,
    duelists: Option<Duelists>,
    shock: JumpShock,
    stuns: StunBook,
    regen: RegenEngine,
    pulse: Cooldown,
    engaged: bool,
    split: SplitStage,
    split_members: Vec<EntityId>,
    events: Vec<ModeEvent>,
}

impl SuperDsMode {
    pub fn new(config: SuperDsConfig) -> Self {
        let shock = JumpShock::new(config.combo_threshold, config.vulnerability_ms);
        let regen = RegenEngine::new(config.regen);
        let pulse = Cooldown::new(config.pulse_ms, 0);
        Self {
            config,
            timers: TimerRegistry::new(),
            duelists: None,
            shock,
            stuns: StunBook::default(),
            regen,
            pulse,
            engaged: false,
            split: SplitStage::Whole,
            split_members: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn duelists(&self) -> Option<Duelists> {
        self.duelists
    }

    pub fn shock(&self) -> &JumpShock {
        &self.shock
    }

    pub fn split_stage(&self) -> SplitStage {
        self.split
    }

    pub fn split_members(&self) -> &[EntityId] {
        &self.split_members
    }

    fn striker(&self) -> Option<EntityId> {
        self.duelists.map(|duel| duel.striker)
    }

    fn register_timers(&mut self, host: &mut dyn Host) {
        let repeating: [(&'static str, u64, TimerHandler<Self>); 2] = [
            ("GiveStrikerFireAmmo", self.config.fire_ammo_interval_ms, Self::give_fire_ammo),
            ("GiveStrikerJumpCharge", self.config.jump_charge_interval_ms, Self::give_jump_charge),
        ];
        for (name, interval_ms, handler) in repeating {
            self.timers.register_repeating(host, name, interval_ms, handler);
        }
    }

    fn give_fire_ammo(&mut self, host: &mut dyn Host) {
        let Some(striker) = self.striker() else {
            return;
        };
        if resolve_alive(host, striker).is_some() {
            host.give_weapon(striker, WeaponItem::FireAmmo);
        }
    }

    fn give_jump_charge(&mut self, _host: &mut dyn Host) {
        self.shock.grant_charge();
    }

    fn stun(&mut self, host: &mut dyn Host, id: EntityId, duration_ms: u64) {
        self.stuns.stun(host, id, duration_ms);
        self.timers.register_once(
            host,
            "RestorePlayerMovement",
            duration_ms,
            Self::restore_player_movement,
        );
    }

    fn restore_player_movement(&mut self, host: &mut dyn Host) {
        self.stuns.release_expired(host);
    }

    fn jump_shock(&mut self, host: &mut dyn Host, striker: EntityId) {
        let Some(caster) = resolve_alive(host, striker) else {
            return;
        };
        let now = host.now_ms();
        if !self.shock.try_trigger(!caster.on_ground, now) {
            return;
        }

        let targets: Vec<_> = host
            .players()
            .into_iter()
            .filter(|target| {
                target.id != caster.id
                    && target.alive()
                    && target.team != caster.team
                    && target.position.distance(caster.position) <= self.config.shock_range
            })
            .collect();
        for target in targets {
            deal_damage(host, target.id, self.config.jump_shock_damage);
            self.regen.mark_combat(target.id, now);
            if let Some(kind) = target.drawn_weapon {
                host.remove_weapon_kind(target.id, kind);
            }
            self.stun(host, target.id, self.config.jump_shock_stun_ms);
            host.play_effect(Effect::Electric, target.position);
        }

        host.play_effect(Effect::Electric, caster.position);
        update_modifiers(host, striker, |mods| mods.current_energy = 0.0);
        self.regen.mark_combat(striker, now);
        self.events.push(ModeEvent::AbilityUsed {
            entity: striker,
            ability: AbilityKind::JumpShock,
        });
    }

    fn combo_shock(&mut self, host: &mut dyn Host, striker: EntityId, hits: &[MeleeHit]) {
        let now = host.now_ms();
        for hit in hits.iter().filter(|hit| hit.is_player) {
            let Some(target) = resolve_alive(host, hit.target) else {
                continue;
            };
            deal_damage(host, target.id, self.config.combo_shock_damage);
            self.regen.mark_combat(target.id, now);
            host.play_effect(Effect::Electric, target.position);
            self.stun(host, target.id, self.config.combo_shock_stun_ms);
        }
        self.events.push(ModeEvent::AbilityUsed {
            entity: striker,
            ability: AbilityKind::ComboShock,
        });
    }

    fn split_juggernaut(&mut self, host: &mut dyn Host) {
        if self.split != SplitStage::Pending {
            return;
        }
        self.split = SplitStage::Split;
        let Some(body) = self
            .duelists
            .and_then(|duel| host.player(duel.juggernaut))
        else {
            return;
        };

        let Some(copy) = host.create_player(body.position) else {
            eprintln!("[superds] host refused the juggernaut copy");
            return;
        };
        host.set_team(copy, body.team);
        host.set_user(copy, body.user);
        if let Some(profile) = &body.profile {
            host.set_profile(copy, profile);
        }
        self.split_members.push(copy);

        for _ in 0..self.config.split_guards {
            let Some(guard) = host.create_player(body.position) else {
                eprintln!("[superds] host refused a split guard");
                continue;
            };
            host.set_team(guard, body.team);
            host.set_guard_target(guard, Some(copy));
            host.set_bot_behavior(guard, BotBehavior::bot(AiType::BotD));
            host.set_camera_focus(guard, CameraFocus::Ignore);
            if let Some(profile) = &body.profile {
                host.set_profile(guard, profile);
            }
            host.set_visibility(guard, Visibility::HIDDEN);
            self.split_members.push(guard);
        }
        self.events.push(ModeEvent::SplitStageReached {
            stage: self.split.index(),
            members: self.split_members.len(),
        });
    }

    /// Slow cadence: charge and exposure cues, combo decay.
    fn pulse(&mut self, host: &mut dyn Host, striker: EntityId) {
        let now = host.now_ms();
        self.shock.settle(now);
        let engaged = std::mem::take(&mut self.engaged);
        let Some(player) = resolve_alive(host, striker) else {
            return;
        };
        if self.shock.has_charge() {
            host.play_effect(Effect::Sparks, player.position);
        }
        if self.shock.exposed(now) {
            host.play_effect(Effect::Steam, player.position);
            host.play_effect(Effect::Steam, player.position);
        }
        if !engaged {
            self.shock.decay_combo();
        }
    }
}

impl GameMode for SuperDsMode {
    fn name(&self) -> &'static str {
        "superds"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.shock = JumpShock::new(self.config.combo_threshold, self.config.vulnerability_ms);
        self.stuns.clear();
        self.regen.reset();
        self.pulse = Cooldown::new(self.config.pulse_ms, host.now_ms());
        self.engaged = false;
        self.split = SplitStage::Whole;
        self.split_members.clear();
        self.duelists = None;

        let players = host.players();
        let [striker, juggernaut, ..] = players.as_slice() else {
            return;
        };
        let striker_mods = striker_modifiers(&striker.modifiers);
        host.set_modifiers(striker.id, &striker_mods);
        host.give_weapon(striker.id, WeaponItem::FireAmmo);
        let juggernaut_mods = juggernaut_modifiers(&juggernaut.modifiers, &striker_mods);
        host.set_modifiers(juggernaut.id, &juggernaut_mods);

        self.duelists = Some(Duelists {
            striker: striker.id,
            juggernaut: juggernaut.id,
        });
        self.register_timers(host);
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn on_player_death(&mut self, player: EntityId, host: &mut dyn Host) {
        let Some(duel) = self.duelists else {
            return;
        };
        if player != duel.juggernaut || self.split != SplitStage::Whole {
            return;
        }
        self.split = SplitStage::Pending;
        self.timers.register_once(
            host,
            "SplitJuggernaut",
            self.config.split_delay_ms,
            Self::split_juggernaut,
        );
        self.events.push(ModeEvent::SplitStageReached {
            stage: self.split.index(),
            members: 0,
        });
    }

    fn on_player_damage(&mut self, player: EntityId, args: DamageArgs, host: &mut dyn Host) {
        let now = host.now_ms();
        self.regen.mark_combat(player, now);
        let Some(striker) = self.striker() else {
            return;
        };
        if args.source == Some(striker) {
            self.engaged = true;
        }
        if player != striker {
            return;
        }
        self.engaged = true;
        if self.shock.exposed(now) {
            deal_damage(host, striker, self.config.vulnerability_extra_damage);
        }
    }

    fn on_melee_action(&mut self, attacker: EntityId, hits: &[MeleeHit], host: &mut dyn Host) {
        self.regen.mark_combat(attacker, host.now_ms());
        if self.striker() != Some(attacker) || hits.is_empty() {
            return;
        }
        self.engaged = true;
        if self.shock.record_melee_hit() {
            self.combo_shock(host, attacker, hits);
        }
    }

    fn on_key_input(&mut self, player: EntityId, input: KeyInput, host: &mut dyn Host) {
        if input.key != VirtualKey::Attack || input.event != KeyEvent::Pressed {
            return;
        }
        if self.striker() == Some(player) {
            self.jump_shock(host, player);
        }
    }

    fn on_update(&mut self, _elapsed_ms: u64, host: &mut dyn Host) {
        let Some(striker) = self.striker() else {
            return;
        };
        let now = host.now_ms();
        if self.shock.exposed(now) {
            self.regen.mark_combat(striker, now);
        }
        self.regen.tick(host);
        if self.pulse.try_fire(now) {
            self.pulse(host, striker);
        }
    }

    fn update_interval_ms(&self) -> Option<u64> {
        Some(self.config.regen.update_ms)
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use crate::types::{Team, Vec2, WeaponKind};

    fn duel() -> (SimHost, SuperDsMode, Duelists) {
        let mut host = SimHost::new(4);
        host.add_player(Team::Team1, false, Vec2::new(0.0, 0.0));
        host.add_player(Team::Team2, false, Vec2::new(30.0, 0.0));
        let mut mode = SuperDsMode::new(SuperDsConfig::default());
        host.start(&mut mode);
        let duel = mode.duelists().expect("two players");
        (host, mode, duel)
    }

    fn health(host: &SimHost, id: EntityId) -> f32 {
        host.player(id).map(|p| p.modifiers.current_health).unwrap_or(0.0)
    }

    fn abilities(mode: &mut SuperDsMode) -> Vec<AbilityKind> {
        mode.drain_events()
            .into_iter()
            .filter_map(|event| match event {
                ModeEvent::AbilityUsed { ability, .. } => Some(ability),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn startup_shapes_both_duelists() {
        let (host, _mode, duel) = duel();
        let striker = host.player(duel.striker).expect("striker").modifiers;
        let juggernaut = host.player(duel.juggernaut).expect("juggernaut").modifiers;

        assert!((striker.projectile_damage_taken - 0.4).abs() < 1e-6);
        assert!((striker.projectile_crit_chance_dealt - 3.0).abs() < 1e-6);
        assert_eq!(striker.max_energy, 120);
        assert!(host.has_weapon(duel.striker, WeaponItem::FireAmmo));

        assert!((juggernaut.size - 2.0).abs() < 1e-6);
        assert_eq!(juggernaut.max_health, 140);
        assert_eq!(juggernaut.max_energy, 156);
        assert!((juggernaut.melee_damage_dealt - 3.2).abs() < 1e-6);

        let mut names = host.active_timer_names();
        names.sort();
        assert_eq!(names, vec!["GiveStrikerFireAmmo", "GiveStrikerJumpCharge"]);
    }

    #[test]
    fn lone_player_keeps_the_mode_inert() {
        let mut host = SimHost::new(4);
        let solo = host.add_player(Team::Team1, false, Vec2::ZERO);
        let mut mode = SuperDsMode::new(SuperDsConfig::default());
        host.start(&mut mode);

        assert!(mode.duelists().is_none());
        assert!(host.active_timer_names().is_empty());
        assert!(!host.has_weapon(solo, WeaponItem::FireAmmo));
        host.advance(&mut mode, 20_000);
        assert!(mode.drain_events().is_empty());
    }

    #[test]
    fn jump_shock_hits_nearby_enemy_and_exposes_the_caster() {
        let (mut host, mut mode, duel) = duel();
        host.set_drawn_weapon(duel.juggernaut, Some(WeaponKind::Melee));
        host.give_weapon(duel.juggernaut, WeaponItem::Knife);
        host.advance(&mut mode, 15_000);
        assert!(mode.shock().has_charge());

        host.set_airborne(duel.striker, true);
        host.press_attack(&mut mode, duel.striker);

        assert!((health(&host, duel.juggernaut) - 95.0).abs() < 1e-6);
        assert!(!host.has_weapon(duel.juggernaut, WeaponItem::Knife));
        assert!(!host.input_enabled(duel.juggernaut));
        assert!(!mode.shock().has_charge());
        assert!(mode.shock().exposed(host.now()));
        assert!(!mode.shock().exposed(host.now() + 3_000));
        let striker = host.player(duel.striker).expect("striker");
        assert_eq!(striker.modifiers.current_energy, 0.0);
        assert_eq!(abilities(&mut mode), vec![AbilityKind::JumpShock]);

        host.advance(&mut mode, 2_000);
        assert!(host.input_enabled(duel.juggernaut));
    }

    #[test]
    fn grounded_or_uncharged_attack_does_nothing() {
        let (mut host, mut mode, duel) = duel();
        host.set_airborne(duel.striker, true);
        host.press_attack(&mut mode, duel.striker);
        assert_eq!(health(&host, duel.juggernaut), 140.0);

        host.advance(&mut mode, 15_000);
        host.set_airborne(duel.striker, false);
        host.press_attack(&mut mode, duel.striker);
        assert_eq!(health(&host, duel.juggernaut), 140.0);
        assert!(mode.shock().has_charge());
    }

    #[test]
    fn out_of_range_and_teammates_are_spared() {
        let mut host = SimHost::new(4);
        let striker = host.add_player(Team::Team1, false, Vec2::new(0.0, 0.0));
        let far = host.add_player(Team::Team2, false, Vec2::new(100.0, 0.0));
        let mate = host.add_player(Team::Team1, true, Vec2::new(5.0, 0.0));
        let mut mode = SuperDsMode::new(SuperDsConfig::default());
        host.start(&mut mode);
        host.advance(&mut mode, 15_000);

        host.set_airborne(striker, true);
        host.press_attack(&mut mode, striker);

        assert_eq!(health(&host, far), 140.0);
        assert_eq!(health(&host, mate), 100.0);
        assert!(host.input_enabled(mate));
        assert!(mode.shock().exposed(host.now()));
    }

    #[test]
    fn exposed_striker_takes_extra_damage() {
        let (mut host, mut mode, duel) = duel();
        host.advance(&mut mode, 15_000);
        host.set_airborne(duel.striker, true);
        host.press_attack(&mut mode, duel.striker);

        host.damage(&mut mode, duel.striker, 10.0, Some(duel.juggernaut));
        assert_eq!(health(&host, duel.striker), 65.0);

        host.advance(&mut mode, 3_000);
        host.damage(&mut mode, duel.striker, 10.0, Some(duel.juggernaut));
        assert_eq!(health(&host, duel.striker), 55.0);
    }

    #[test]
    fn every_third_connecting_swing_shocks() {
        let (mut host, mut mode, duel) = duel();
        for _ in 0..2 {
            host.melee(&mut mode, duel.striker, &[duel.juggernaut], 1.0);
        }
        assert!(abilities(&mut mode).is_empty());
        assert!(host.input_enabled(duel.juggernaut));

        host.melee(&mut mode, duel.striker, &[duel.juggernaut], 1.0);
        assert_eq!(abilities(&mut mode), vec![AbilityKind::ComboShock]);
        assert_eq!(health(&host, duel.juggernaut), 117.0);
        assert!(!host.input_enabled(duel.juggernaut));
        assert_eq!(mode.shock().combo(), 0);

        host.melee(&mut mode, duel.striker, &[], 1.0);
        assert_eq!(mode.shock().combo(), 0);
    }

    #[test]
    fn combo_decays_when_the_striker_goes_quiet() {
        let (mut host, mut mode, duel) = duel();
        host.melee(&mut mode, duel.striker, &[duel.juggernaut], 1.0);
        host.melee(&mut mode, duel.striker, &[duel.juggernaut], 1.0);
        host.advance(&mut mode, 1_000);
        assert_eq!(mode.shock().combo(), 2);
        host.advance(&mut mode, 1_000);
        assert_eq!(mode.shock().combo(), 1);
        host.advance(&mut mode, 2_000);
        assert_eq!(mode.shock().combo(), 0);
    }

    #[test]
    fn juggernaut_splits_once_after_first_death() {
        let (mut host, mut mode, duel) = duel();
        host.kill(duel.juggernaut);
        host.deliver_deaths(&mut mode);
        assert_eq!(mode.split_stage(), SplitStage::Pending);

        host.advance(&mut mode, 1_000);
        assert_eq!(mode.split_stage(), SplitStage::Split);
        let members = mode.split_members().to_vec();
        assert_eq!(members.len(), 4);

        let copy = host.player(members[0]).expect("copy");
        assert_eq!(copy.team, Team::Team2);
        assert!(copy.human());
        assert!((copy.modifiers.size - 1.0).abs() < 1e-6);
        for guard in &members[1..] {
            let guard = host.player(*guard).expect("guard");
            assert_eq!(guard.guard_target, Some(copy.id));
            assert_eq!(guard.behavior, BotBehavior::bot(AiType::BotD));
            assert_eq!(guard.visibility, Visibility::HIDDEN);
            assert_eq!(guard.camera, CameraFocus::Ignore);
        }

        host.kill(copy.id);
        host.deliver_deaths(&mut mode);
        host.advance(&mut mode, 5_000);
        assert_eq!(mode.split_members().len(), 4);
        let stages: Vec<u8> = mode
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                ModeEvent::SplitStageReached { stage, .. } => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![1, 2]);
    }

    #[test]
    fn striker_regenerates_once_out_of_combat() {
        let (mut host, mut mode, duel) = duel();
        host.set_health(duel.striker, 50.0);
        host.set_energy(duel.striker, 120.0);
        host.advance(&mut mode, 2_000);
        assert_eq!(health(&host, duel.striker), 55.0);
    }
}
