use crate::types::{
    BehaviorSet, BotBehavior, CameraFocus, DroneWeapon, Effect, EntityId, Modifiers,
    PlayerSnapshot, Profile, Repeat, Team, TimerId, UserHandle, Vec2, Visibility, WeaponItem,
    WeaponKind,
};

/// Everything a mode may ask of the running match. The host owns entities,
/// physics and timers; modes only read snapshots and issue commands.
pub trait Host {
    fn now_ms(&self) -> u64;

    fn players(&self) -> Vec<PlayerSnapshot>;
    fn player(&self, id: EntityId) -> Option<PlayerSnapshot>;
    /// Player spawn markers placed on the map.
    fn spawn_points(&self) -> Vec<Vec2>;
    /// Enabled ground and platform path nodes, elevators excluded.
    fn path_nodes(&self) -> Vec<Vec2>;
    fn object_alive(&self, id: EntityId) -> bool;

    fn create_player(&mut self, position: Vec2) -> Option<EntityId>;
    fn create_drone(
        &mut self,
        position: Vec2,
        weapon: DroneWeapon,
        team: Team,
        owner: Option<EntityId>,
    ) -> Option<EntityId>;
    fn create_object(&mut self, tag: &str, position: Vec2, health: f32) -> Option<EntityId>;
    /// Removes every object carrying `tag` and returns how many were removed.
    fn remove_objects(&mut self, tag: &str) -> usize;

    fn set_team(&mut self, id: EntityId, team: Team);
    fn set_name(&mut self, id: EntityId, name: &str);
    fn set_profile(&mut self, id: EntityId, profile: &Profile);
    fn set_bot_behavior(&mut self, id: EntityId, behavior: BotBehavior);
    fn set_behavior_set(&mut self, id: EntityId, set: BehaviorSet);
    fn set_guard_target(&mut self, id: EntityId, target: Option<EntityId>);
    fn set_visibility(&mut self, id: EntityId, visibility: Visibility);
    fn set_camera_focus(&mut self, id: EntityId, focus: CameraFocus);
    fn set_modifiers(&mut self, id: EntityId, modifiers: &Modifiers);
    fn set_user(&mut self, id: EntityId, user: Option<UserHandle>);
    fn set_input_enabled(&mut self, id: EntityId, enabled: bool);
    fn set_strength_boost(&mut self, id: EntityId, duration_ms: u64);
    fn give_weapon(&mut self, id: EntityId, weapon: WeaponItem);
    fn remove_weapon_kind(&mut self, id: EntityId, kind: WeaponKind);
    fn kill(&mut self, id: EntityId);
    fn gib(&mut self, id: EntityId);
    fn knock_down(&mut self, id: EntityId);
    fn set_auto_victory(&mut self, enabled: bool);

    /// Schedules `name` to be dispatched back to the mode that started it.
    fn start_timer(&mut self, name: &str, interval_ms: u64, repeat: Repeat) -> TimerId;
    fn stop_timer(&mut self, id: TimerId);

    fn show_popup(&mut self, text: &str);
    fn play_effect(&mut self, effect: Effect, position: Vec2);
    fn run_command(&mut self, command: &str);
}

/// Re-reads `id` and returns it only while it still exists and is alive.
pub fn resolve_alive(host: &dyn Host, id: EntityId) -> Option<PlayerSnapshot> {
    host.player(id).filter(|player| player.alive())
}

/// Read-modify-write of a live player's modifiers.
pub fn update_modifiers(
    host: &mut dyn Host,
    id: EntityId,
    apply: impl FnOnce(&mut Modifiers),
) -> Option<Modifiers> {
    let player = resolve_alive(host, id)?;
    let mut modifiers = player.modifiers;
    apply(&mut modifiers);
    host.set_modifiers(id, &modifiers);
    Some(modifiers)
}

/// Direct health loss that bypasses the damage callbacks. Kills at zero.
pub fn deal_damage(host: &mut dyn Host, id: EntityId, amount: f32) -> bool {
    let mut lethal = false;
    if update_modifiers(host, id, |mods| lethal = mods.take_raw_damage(amount)).is_none() {
        return false;
    }
    if lethal {
        host.kill(id);
    }
    lethal
}

/// Strips the four weapon slots a loadout refills.
pub fn strip_weapons(host: &mut dyn Host, id: EntityId) {
    for kind in [
        WeaponKind::Rifle,
        WeaponKind::Handgun,
        WeaponKind::Melee,
        WeaponKind::Thrown,
    ] {
        host.remove_weapon_kind(id, kind);
    }
}
