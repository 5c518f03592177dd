use std::collections::{BTreeMap, VecDeque};

use crate::host::{deal_damage, resolve_alive, Host};
use crate::mode::GameMode;
use crate::rng::Rng;
use crate::types::{
    BehaviorSet, BotBehavior, CameraFocus, DamageArgs, DroneWeapon, Effect, EntityId, KeyInput,
    MeleeHit, Modifiers, PlayerSnapshot, Profile, Repeat, Team, TimerId, UserHandle, Vec2,
    VirtualKey, Visibility, WeaponItem, WeaponKind,
};

pub const DRONE_TAG: &str = "streetsweeper";

#[derive(Clone, Debug)]
struct SimPlayer {
    snapshot: PlayerSnapshot,
    name: String,
    weapons: Vec<WeaponItem>,
    behavior_set: BehaviorSet,
    input_enabled: bool,
    boost_until: u64,
    knockdowns: u32,
    gibbed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimObject {
    pub tag: String,
    pub position: Vec2,
    pub health: f32,
    pub team: Team,
    pub owner: Option<EntityId>,
    pub drone: Option<DroneWeapon>,
    pub destroyed: bool,
}

#[derive(Clone, Debug)]
struct SimTimer {
    name: String,
    interval_ms: u64,
    due_at: u64,
    remaining: Option<u32>,
}

enum Due {
    Timer(TimerId),
    Update(u64),
}

/// In-memory host with a manual clock. Timers fire in due order, and death
/// notifications raised inside a callback are delivered right after it.
#[derive(Clone, Debug)]
pub struct SimHost {
    now_ms: u64,
    next_entity: u32,
    next_timer: u64,
    next_user: u32,
    players: BTreeMap<EntityId, SimPlayer>,
    objects: BTreeMap<EntityId, SimObject>,
    spawn_points: Vec<Vec2>,
    path_nodes: Vec<Vec2>,
    timers: BTreeMap<TimerId, SimTimer>,
    pending_deaths: VecDeque<EntityId>,
    popups: Vec<String>,
    commands: Vec<String>,
    effects: Vec<(Effect, Vec2)>,
    auto_victory: bool,
    refuse_creation: bool,
    update_interval: Option<u64>,
    next_update_at: Option<u64>,
    rng: Rng,
}

impl SimHost {
    pub fn new(seed: u32) -> Self {
        Self {
            now_ms: 0,
            next_entity: 1,
            next_timer: 1,
            next_user: 1,
            players: BTreeMap::new(),
            objects: BTreeMap::new(),
            spawn_points: Vec::new(),
            path_nodes: Vec::new(),
            timers: BTreeMap::new(),
            pending_deaths: VecDeque::new(),
            popups: Vec::new(),
            commands: Vec::new(),
            effects: Vec::new(),
            auto_victory: true,
            refuse_creation: false,
            update_interval: None,
            next_update_at: None,
            rng: Rng::new(seed),
        }
    }

    pub fn with_map(mut self, spawn_points: Vec<Vec2>, path_nodes: Vec<Vec2>) -> Self {
        self.spawn_points = spawn_points;
        self.path_nodes = path_nodes;
        self
    }

    /// Places a player before the round starts. Humans get a fresh user handle.
    pub fn add_player(&mut self, team: Team, bot: bool, position: Vec2) -> EntityId {
        let id = self.insert_player(position);
        let user = if bot {
            None
        } else {
            let handle = UserHandle(self.next_user);
            self.next_user += 1;
            Some(handle)
        };
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.team = team;
            player.snapshot.user = user;
            player.snapshot.bot = bot;
            player.snapshot.behavior = if bot {
                BotBehavior::bot(crate::types::AiType::BotB)
            } else {
                BotBehavior::none()
            };
        }
        id
    }

    /// Adds a player mid-round and notifies the mode like a host spawn.
    pub fn spawn_player(
        &mut self,
        mode: &mut dyn GameMode,
        team: Team,
        bot: bool,
        position: Vec2,
    ) -> EntityId {
        let id = self.add_player(team, bot, position);
        mode.on_player_spawned(id, self);
        self.deliver_deaths(mode);
        id
    }

    fn insert_player(&mut self, position: Vec2) -> EntityId {
        let id = self.allocate_id();
        let snapshot = PlayerSnapshot {
            id,
            team: Team::Independent,
            dead: false,
            bot: true,
            position,
            on_ground: true,
            modifiers: Modifiers::default(),
            behavior: BotBehavior::none(),
            guard_target: None,
            profile: None,
            user: None,
            visibility: Visibility::SHOWN,
            camera: CameraFocus::Default,
            drawn_weapon: None,
        };
        self.players.insert(
            id,
            SimPlayer {
                snapshot,
                name: String::new(),
                weapons: Vec::new(),
                behavior_set: BehaviorSet::default(),
                input_enabled: true,
                boost_until: 0,
                knockdowns: 0,
                gibbed: false,
            },
        );
        id
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub fn start(&mut self, mode: &mut dyn GameMode) {
        mode.on_startup(self);
        self.deliver_deaths(mode);
        self.update_interval = mode.update_interval_ms().filter(|interval| *interval > 0);
        self.next_update_at = self.update_interval.map(|interval| self.now_ms + interval);
    }

    /// Moves the clock forward, firing timers and updates that fall due.
    pub fn advance(&mut self, mode: &mut dyn GameMode, dt_ms: u64) {
        let target = self.now_ms + dt_ms;
        while let Some(due) = self.next_due(target) {
            match due {
                Due::Timer(id) => self.fire_timer(mode, id),
                Due::Update(at) => {
                    self.now_ms = at;
                    let interval = self.update_interval.unwrap_or(0);
                    self.next_update_at = Some(at + interval.max(1));
                    mode.on_update(interval, self);
                    self.deliver_deaths(mode);
                }
            }
        }
        self.now_ms = target;
    }

    fn next_due(&self, target: u64) -> Option<Due> {
        let timer = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_at <= target)
            .min_by_key(|(id, timer)| (timer.due_at, **id))
            .map(|(id, timer)| (timer.due_at, *id));
        let update = self.next_update_at.filter(|at| *at <= target);
        match (timer, update) {
            (Some((at, id)), Some(update_at)) if at <= update_at => Some(Due::Timer(id)),
            (_, Some(update_at)) => Some(Due::Update(update_at)),
            (Some((_, id)), None) => Some(Due::Timer(id)),
            (None, None) => None,
        }
    }

    fn fire_timer(&mut self, mode: &mut dyn GameMode, id: TimerId) {
        let Some(timer) = self.timers.get_mut(&id) else {
            return;
        };
        self.now_ms = timer.due_at;
        let name = timer.name.clone();
        let finished = match timer.remaining.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        };
        if finished {
            self.timers.remove(&id);
        } else {
            timer.due_at += timer.interval_ms.max(1);
        }
        mode.on_timer(id, &name, self);
        self.deliver_deaths(mode);
    }

    pub fn deliver_deaths(&mut self, mode: &mut dyn GameMode) {
        while let Some(id) = self.pending_deaths.pop_front() {
            mode.on_player_death(id, self);
        }
    }

    /// Raw damage from `source`, reported through the damage callback.
    pub fn damage(
        &mut self,
        mode: &mut dyn GameMode,
        target: EntityId,
        amount: f32,
        source: Option<EntityId>,
    ) -> bool {
        if resolve_alive(self, target).is_none() {
            return false;
        }
        let lethal = deal_damage(self, target, amount);
        mode.on_player_damage(target, DamageArgs { source, amount }, self);
        self.deliver_deaths(mode);
        lethal
    }

    /// Melee swing that lands on `targets`, followed by the melee callback.
    pub fn melee(
        &mut self,
        mode: &mut dyn GameMode,
        attacker: EntityId,
        targets: &[EntityId],
        amount: f32,
    ) {
        let mut hits = Vec::new();
        for target in targets {
            if resolve_alive(self, *target).is_none() {
                continue;
            }
            deal_damage(self, *target, amount);
            mode.on_player_damage(
                *target,
                DamageArgs {
                    source: Some(attacker),
                    amount,
                },
                self,
            );
            hits.push(MeleeHit {
                target: *target,
                is_player: true,
            });
        }
        mode.on_melee_action(attacker, &hits, self);
        self.deliver_deaths(mode);
    }

    pub fn press_attack(&mut self, mode: &mut dyn GameMode, player: EntityId) {
        mode.on_key_input(player, KeyInput::pressed(VirtualKey::Attack), self);
        self.deliver_deaths(mode);
    }

    /// One exchange of fire between a random live player and a random live
    /// enemy, scaled by their projectile modifiers.
    pub fn skirmish_step(
        &mut self,
        mode: &mut dyn GameMode,
        base_damage: f32,
    ) -> Option<(EntityId, EntityId)> {
        let fighters: Vec<PlayerSnapshot> = self
            .players()
            .into_iter()
            .filter(|player| player.alive() && player.team.is_playable())
            .collect();
        let attacker = self.rng.pick(&fighters)?.clone();
        let enemies: Vec<&PlayerSnapshot> = fighters
            .iter()
            .filter(|player| player.team != attacker.team)
            .collect();
        let target = (*self.rng.pick(&enemies)?).clone();
        let amount = base_damage
            * attacker.modifiers.projectile_damage_dealt
            * target.modifiers.projectile_damage_taken;
        self.damage(mode, target.id, amount, Some(attacker.id));
        Some((attacker.id, target.id))
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn popups(&self) -> &[String] {
        &self.popups
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn effects(&self) -> &[(Effect, Vec2)] {
        &self.effects
    }

    pub fn auto_victory(&self) -> bool {
        self.auto_victory
    }

    pub fn active_timer_names(&self) -> Vec<String> {
        self.timers.values().map(|timer| timer.name.clone()).collect()
    }

    pub fn weapons(&self, id: EntityId) -> Vec<WeaponItem> {
        self.players
            .get(&id)
            .map(|player| player.weapons.clone())
            .unwrap_or_default()
    }

    pub fn has_weapon(&self, id: EntityId, weapon: WeaponItem) -> bool {
        self.players
            .get(&id)
            .is_some_and(|player| player.weapons.contains(&weapon))
    }

    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.players.get(&id).map(|player| player.name.as_str())
    }

    pub fn input_enabled(&self, id: EntityId) -> bool {
        self.players
            .get(&id)
            .is_some_and(|player| player.input_enabled)
    }

    pub fn boost_until(&self, id: EntityId) -> u64 {
        self.players
            .get(&id)
            .map(|player| player.boost_until)
            .unwrap_or(0)
    }

    pub fn knockdowns(&self, id: EntityId) -> u32 {
        self.players
            .get(&id)
            .map(|player| player.knockdowns)
            .unwrap_or(0)
    }

    pub fn gibbed(&self, id: EntityId) -> bool {
        self.players.get(&id).is_some_and(|player| player.gibbed)
    }

    pub fn behavior_set(&self, id: EntityId) -> Option<BehaviorSet> {
        self.players.get(&id).map(|player| player.behavior_set)
    }

    pub fn object(&self, id: EntityId) -> Option<&SimObject> {
        self.objects.get(&id)
    }

    pub fn objects_tagged(&self, tag: &str) -> Vec<EntityId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.tag == tag && !object.destroyed)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn damage_object(&mut self, id: EntityId, amount: f32) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.health -= amount;
            if object.health <= 0.0 {
                object.destroyed = true;
            }
        }
    }

    pub fn live_players(&self) -> Vec<PlayerSnapshot> {
        self.players()
            .into_iter()
            .filter(PlayerSnapshot::alive)
            .collect()
    }

    pub fn set_airborne(&mut self, id: EntityId, airborne: bool) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.on_ground = !airborne;
        }
    }

    pub fn set_drawn_weapon(&mut self, id: EntityId, kind: Option<WeaponKind>) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.drawn_weapon = kind;
        }
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec2) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.position = position;
        }
    }

    pub fn set_health(&mut self, id: EntityId, health: f32) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.modifiers.current_health = health;
        }
    }

    pub fn set_energy(&mut self, id: EntityId, energy: f32) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.modifiers.current_energy = energy;
        }
    }

    /// Marks a player dead without raising a death notification.
    pub fn force_dead(&mut self, id: EntityId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.dead = true;
            player.snapshot.modifiers.current_health = 0.0;
        }
    }

    pub fn refuse_creation(&mut self, refuse: bool) {
        self.refuse_creation = refuse;
    }
}

impl Host for SimHost {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn players(&self) -> Vec<PlayerSnapshot> {
        self.players
            .values()
            .map(|player| {
                let mut snapshot = player.snapshot.clone();
                snapshot.drawn_weapon = player
                    .weapons
                    .iter()
                    .rev()
                    .map(|weapon| weapon.kind())
                    .find(|kind| *kind != WeaponKind::Powerup);
                snapshot
            })
            .collect()
    }

    fn player(&self, id: EntityId) -> Option<PlayerSnapshot> {
        let player = self.players.get(&id)?;
        let mut snapshot = player.snapshot.clone();
        snapshot.drawn_weapon = player
            .weapons
            .iter()
            .rev()
            .map(|weapon| weapon.kind())
            .find(|kind| *kind != WeaponKind::Powerup);
        Some(snapshot)
    }

    fn spawn_points(&self) -> Vec<Vec2> {
        self.spawn_points.clone()
    }

    fn path_nodes(&self) -> Vec<Vec2> {
        self.path_nodes.clone()
    }

    fn object_alive(&self, id: EntityId) -> bool {
        self.objects.get(&id).is_some_and(|object| !object.destroyed)
    }

    fn create_player(&mut self, position: Vec2) -> Option<EntityId> {
        if self.refuse_creation {
            return None;
        }
        Some(self.insert_player(position))
    }

    fn create_drone(
        &mut self,
        position: Vec2,
        weapon: DroneWeapon,
        team: Team,
        owner: Option<EntityId>,
    ) -> Option<EntityId> {
        if self.refuse_creation {
            return None;
        }
        let id = self.allocate_id();
        self.objects.insert(
            id,
            SimObject {
                tag: DRONE_TAG.to_string(),
                position,
                health: 100.0,
                team,
                owner,
                drone: Some(weapon),
                destroyed: false,
            },
        );
        Some(id)
    }

    fn create_object(&mut self, tag: &str, position: Vec2, health: f32) -> Option<EntityId> {
        if self.refuse_creation {
            return None;
        }
        let id = self.allocate_id();
        self.objects.insert(
            id,
            SimObject {
                tag: tag.to_string(),
                position,
                health,
                team: Team::Independent,
                owner: None,
                drone: None,
                destroyed: false,
            },
        );
        Some(id)
    }

    fn remove_objects(&mut self, tag: &str) -> usize {
        let mut removed = 0;
        for object in self.objects.values_mut() {
            if object.tag == tag && !object.destroyed {
                object.destroyed = true;
                removed += 1;
            }
        }
        removed
    }

    fn set_team(&mut self, id: EntityId, team: Team) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.team = team;
        }
    }

    fn set_name(&mut self, id: EntityId, name: &str) {
        if let Some(player) = self.players.get_mut(&id) {
            player.name = name.to_string();
        }
    }

    fn set_profile(&mut self, id: EntityId, profile: &Profile) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.profile = Some(profile.clone());
        }
    }

    fn set_bot_behavior(&mut self, id: EntityId, behavior: BotBehavior) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.behavior = behavior;
        }
    }

    fn set_behavior_set(&mut self, id: EntityId, set: BehaviorSet) {
        if let Some(player) = self.players.get_mut(&id) {
            player.behavior_set = set;
        }
    }

    fn set_guard_target(&mut self, id: EntityId, target: Option<EntityId>) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.guard_target = target;
        }
    }

    fn set_visibility(&mut self, id: EntityId, visibility: Visibility) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.visibility = visibility;
        }
    }

    fn set_camera_focus(&mut self, id: EntityId, focus: CameraFocus) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.camera = focus;
        }
    }

    fn set_modifiers(&mut self, id: EntityId, modifiers: &Modifiers) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.modifiers = *modifiers;
        }
    }

    fn set_user(&mut self, id: EntityId, user: Option<UserHandle>) {
        if let Some(player) = self.players.get_mut(&id) {
            player.snapshot.user = user;
            player.snapshot.bot = user.is_none();
        }
    }

    fn set_input_enabled(&mut self, id: EntityId, enabled: bool) {
        if let Some(player) = self.players.get_mut(&id) {
            player.input_enabled = enabled;
        }
    }

    fn set_strength_boost(&mut self, id: EntityId, duration_ms: u64) {
        let now = self.now_ms;
        if let Some(player) = self.players.get_mut(&id) {
            player.boost_until = now + duration_ms;
        }
    }

    fn give_weapon(&mut self, id: EntityId, weapon: WeaponItem) {
        if let Some(player) = self.players.get_mut(&id) {
            player.weapons.push(weapon);
        }
    }

    fn remove_weapon_kind(&mut self, id: EntityId, kind: WeaponKind) {
        if let Some(player) = self.players.get_mut(&id) {
            player.weapons.retain(|weapon| weapon.kind() != kind);
        }
    }

    fn kill(&mut self, id: EntityId) {
        let Some(player) = self.players.get_mut(&id) else {
            return;
        };
        if player.snapshot.dead {
            return;
        }
        player.snapshot.dead = true;
        player.snapshot.modifiers.current_health = 0.0;
        self.pending_deaths.push_back(id);
    }

    fn gib(&mut self, id: EntityId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.gibbed = true;
        }
        self.kill(id);
    }

    fn knock_down(&mut self, id: EntityId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.knockdowns += 1;
        }
    }

    fn set_auto_victory(&mut self, enabled: bool) {
        self.auto_victory = enabled;
    }

    fn start_timer(&mut self, name: &str, interval_ms: u64, repeat: Repeat) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        let remaining = match repeat {
            Repeat::Forever => None,
            Repeat::Times(count) => Some(count.max(1)),
        };
        self.timers.insert(
            id,
            SimTimer {
                name: name.to_string(),
                interval_ms,
                due_at: self.now_ms + interval_ms.max(1),
                remaining,
            },
        );
        id
    }

    fn stop_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn show_popup(&mut self, text: &str) {
        self.popups.push(text.to_string());
    }

    fn play_effect(&mut self, effect: Effect, position: Vec2) {
        self.effects.push((effect, position));
    }

    fn run_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}
