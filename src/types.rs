use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Stable host-side identity of a player or object. Never a pointer: every
/// use re-resolves it against the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of the connected user controlling a player, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Independent,
    Team1,
    Team2,
    Team3,
    Team4,
}

impl Team {
    pub const PLAYABLE: [Team; 4] = [Team::Team1, Team::Team2, Team::Team3, Team::Team4];

    pub fn label(self) -> &'static str {
        match self {
            Team::Team1 => "TEAM 1",
            Team::Team2 => "TEAM 2",
            Team::Team3 => "TEAM 3",
            Team::Team4 => "TEAM 4",
            Team::Independent => "UNKNOWN TEAM",
        }
    }

    pub fn is_playable(self) -> bool {
        self != Team::Independent
    }

    pub fn from_index(index: usize) -> Team {
        match index {
            1 => Team::Team1,
            2 => Team::Team2,
            3 => Team::Team3,
            4 => Team::Team4,
            _ => Team::Independent,
        }
    }
}

/// Predefined bot brains the host offers. Only the tier is read or set here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiType {
    BotA,
    BotB,
    BotC,
    BotD,
    Grunt,
    Hulk,
    Meatgrinder,
    CompanionA,
    CompanionC,
    CompanionD,
    ZombieB,
}

impl AiType {
    /// Tiers that earn the katana in the ninja loadout.
    pub fn is_elite(self) -> bool {
        matches!(
            self,
            AiType::Hulk | AiType::Grunt | AiType::BotD | AiType::BotC | AiType::Meatgrinder
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotBehavior {
    pub active: bool,
    pub ai: Option<AiType>,
}

impl BotBehavior {
    pub fn bot(ai: AiType) -> Self {
        Self {
            active: true,
            ai: Some(ai),
        }
    }

    pub fn none() -> Self {
        Self {
            active: false,
            ai: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSet {
    pub search_items: f32,
    pub melee_usage: bool,
}

impl Default for BehaviorSet {
    fn default() -> Self {
        Self {
            search_items: 1.0,
            melee_usage: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFocus {
    #[default]
    Default,
    Focus,
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub nametag: bool,
    pub status_bars: bool,
}

impl Visibility {
    pub const SHOWN: Visibility = Visibility {
        nametag: true,
        status_bars: true,
    };
    pub const HIDDEN: Visibility = Visibility {
        nametag: false,
        status_bars: false,
    };
}

/// The host's per-player stat bag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    pub max_health: i32,
    pub current_health: f32,
    pub max_energy: i32,
    pub current_energy: f32,
    pub energy_recharge: f32,
    pub size: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,
    pub melee_damage_dealt: f32,
    pub projectile_damage_dealt: f32,
    pub projectile_crit_chance_dealt: f32,
    pub melee_force: f32,
    pub melee_damage_taken: f32,
    pub projectile_damage_taken: f32,
    pub fire_damage_taken: f32,
    pub impact_damage_taken: f32,
    pub explosion_damage_taken: f32,
    pub melee_stun_immunity: bool,
    pub infinite_ammo: bool,
    pub drops_items: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            max_health: 100,
            current_health: 100.0,
            max_energy: 100,
            current_energy: 100.0,
            energy_recharge: 1.0,
            size: 1.0,
            run_speed: 1.0,
            sprint_speed: 1.0,
            melee_damage_dealt: 1.0,
            projectile_damage_dealt: 1.0,
            projectile_crit_chance_dealt: 1.0,
            melee_force: 1.0,
            melee_damage_taken: 1.0,
            projectile_damage_taken: 1.0,
            fire_damage_taken: 1.0,
            impact_damage_taken: 1.0,
            explosion_damage_taken: 1.0,
            melee_stun_immunity: false,
            infinite_ammo: false,
            drops_items: true,
        }
    }
}

impl Modifiers {
    pub fn with_health(max_health: i32) -> Self {
        Self {
            max_health,
            current_health: max_health as f32,
            ..Self::default()
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.current_health / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn restore_full_health(&mut self) {
        self.current_health = self.max_health as f32;
    }

    /// Changes max health while keeping the same fraction of it filled.
    pub fn rescale_max_health(&mut self, max_health: i32) {
        let ratio = self.health_ratio();
        self.max_health = max_health;
        self.current_health = (max_health as f32 * ratio).floor();
    }

    pub fn heal(&mut self, amount: f32) {
        self.current_health = (self.current_health + amount).min(self.max_health as f32);
    }

    /// Subtracts raw health. Returns true when the hit is lethal.
    pub fn take_raw_damage(&mut self, amount: f32) -> bool {
        self.current_health -= amount;
        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            return true;
        }
        false
    }

    pub fn energy_full(&self) -> bool {
        self.current_energy >= self.max_energy as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Melee,
    Handgun,
    Rifle,
    Thrown,
    Powerup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponItem {
    Grenades,
    Shuriken,
    Pistol,
    Magnum,
    Shotgun,
    Smg,
    Sniper,
    Bazooka,
    Bow,
    GrenadeLauncher,
    Lazer,
    Knife,
    Katana,
    Bat,
    Bottle,
    Pipe,
    Chair,
    FireAmmo,
    Slowmo5,
}

impl WeaponItem {
    pub fn kind(self) -> WeaponKind {
        match self {
            WeaponItem::Grenades | WeaponItem::Shuriken => WeaponKind::Thrown,
            WeaponItem::Pistol | WeaponItem::Magnum => WeaponKind::Handgun,
            WeaponItem::Shotgun
            | WeaponItem::Smg
            | WeaponItem::Sniper
            | WeaponItem::Bazooka
            | WeaponItem::Bow
            | WeaponItem::GrenadeLauncher
            | WeaponItem::Lazer => WeaponKind::Rifle,
            WeaponItem::Knife
            | WeaponItem::Katana
            | WeaponItem::Bat
            | WeaponItem::Bottle
            | WeaponItem::Pipe
            | WeaponItem::Chair => WeaponKind::Melee,
            WeaponItem::FireAmmo | WeaponItem::Slowmo5 => WeaponKind::Powerup,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneWeapon {
    MachineGun,
    Flamethrower,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Electric,
    Sparks,
    Steam,
    Blood,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub name: String,
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub gender: Gender,
    pub skin: Option<ClothingItem>,
    pub head: Option<ClothingItem>,
    pub chest_over: Option<ClothingItem>,
    pub chest_under: Option<ClothingItem>,
    pub hands: Option<ClothingItem>,
    pub waist: Option<ClothingItem>,
    pub legs: Option<ClothingItem>,
    pub feet: Option<ClothingItem>,
    pub accessory: Option<ClothingItem>,
}

impl Profile {
    pub fn named(name: &str, gender: Gender) -> Self {
        Self {
            name: name.to_string(),
            gender,
            skin: None,
            head: None,
            chest_over: None,
            chest_under: None,
            hands: None,
            waist: None,
            legs: None,
            feet: None,
            accessory: None,
        }
    }
}

/// By-value copy of a host player. Only valid for the callback it was read in.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub id: EntityId,
    pub team: Team,
    pub dead: bool,
    pub bot: bool,
    pub position: Vec2,
    pub on_ground: bool,
    pub modifiers: Modifiers,
    pub behavior: BotBehavior,
    pub guard_target: Option<EntityId>,
    pub profile: Option<Profile>,
    pub user: Option<UserHandle>,
    pub visibility: Visibility,
    pub camera: CameraFocus,
    pub drawn_weapon: Option<WeaponKind>,
}

impl PlayerSnapshot {
    pub fn alive(&self) -> bool {
        !self.dead
    }

    pub fn human(&self) -> bool {
        !self.bot
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageArgs {
    pub source: Option<EntityId>,
    pub amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeHit {
    pub target: EntityId,
    pub is_player: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VirtualKey {
    Attack,
    Jump,
    Block,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: VirtualKey,
    pub event: KeyEvent,
}

impl KeyInput {
    pub fn pressed(key: VirtualKey) -> Self {
        Self {
            key,
            event: KeyEvent::Pressed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscortTier {
    Rookie,
    Captain,
    Artillery,
    Drone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistKind {
    Shotgun,
    Knife,
    Heavy,
    Smg,
}

impl SpecialistKind {
    pub const ALL: [SpecialistKind; 4] = [
        SpecialistKind::Shotgun,
        SpecialistKind::Knife,
        SpecialistKind::Heavy,
        SpecialistKind::Smg,
    ];

    pub fn slot(self) -> usize {
        match self {
            SpecialistKind::Shotgun => 0,
            SpecialistKind::Knife => 1,
            SpecialistKind::Heavy => 2,
            SpecialistKind::Smg => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    Winner { team: Team },
    Draw,
    Eliminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    JumpShock,
    ComboShock,
    StrengthBoost,
    DroneDeploy,
    MinionCall,
    Laser,
    Gib,
    Susano,
    Slowmo,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModeEvent {
    ColonelAssigned {
        team: Team,
        entity: EntityId,
    },
    EscortSpawned {
        team: Team,
        tier: EscortTier,
        entity: EntityId,
    },
    SpecialistAssigned {
        team: Team,
        entity: EntityId,
        kind: SpecialistKind,
        weapon: WeaponItem,
    },
    RespawnQueued {
        team: Team,
        #[serde(rename = "originalId")]
        original_id: EntityId,
    },
    Respawned {
        team: Team,
        #[serde(rename = "originalId")]
        original_id: EntityId,
        entity: EntityId,
    },
    RespawnDropped {
        team: Team,
        #[serde(rename = "originalId")]
        original_id: EntityId,
    },
    RoundOver {
        outcome: RoundOutcome,
    },
    AbilityUsed {
        entity: EntityId,
        ability: AbilityKind,
    },
    HungerChanged {
        entity: EntityId,
        hungry: bool,
    },
    SusanoChanged {
        entity: EntityId,
        manifested: bool,
    },
    SplitStageReached {
        stage: u8,
        members: usize,
    },
    ObjectiveSpawned {
        team: Team,
        entity: EntityId,
    },
    RestartRequested {
        message: String,
    },
}
