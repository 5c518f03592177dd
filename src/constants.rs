// Militia round cadence.
pub const ROOKIE_INTERVAL_MS: u64 = 6_000;
pub const CAPTAIN_INTERVAL_MS: u64 = 12_000;
pub const ARTILLERY_INTERVAL_MS: u64 = 20_000;
pub const DRONE_INTERVAL_MS: u64 = 16_000;
pub const RESPAWN_DRAIN_INTERVAL_MS: u64 = 5_000;
pub const WINNER_CHECK_INTERVAL_MS: u64 = 2_000;
pub const ARTILLERY_FIRE_AMMO_INTERVAL_MS: u64 = 10_000;
pub const IDENTIFY_COLONELS_DELAY_MS: u64 = 1_000;

pub const SPECIALIST_KIND_COUNT: usize = 4;
pub const LEAD_PLAYER_RESISTANCE: f32 = 0.8;

pub const COLONEL_HEALTH: i32 = 600;
pub const COLONEL_NAME: &str = "COLONEL";

pub const ROOKIE_HEALTH: i32 = 5;
pub const ROOKIE_SIZE: f32 = 0.88;
pub const ROOKIE_DAMAGE_MULTIPLIER: f32 = 0.1;

pub const CAPTAIN_HEALTH: i32 = 15;
pub const CAPTAIN_DAMAGE_MULTIPLIER: f32 = 0.3;

pub const ARTILLERY_HEALTH: i32 = 100;
pub const ARTILLERY_SPEED: f32 = 0.35;
pub const ARTILLERY_SIZE: f32 = 1.5;
pub const ARTILLERY_PROJECTILE_DEALT: f32 = 0.2;
pub const ARTILLERY_FIRE_TAKEN: f32 = 1.3;
pub const ARTILLERY_PROJECTILE_TAKEN: f32 = 0.4;
pub const ARTILLERY_MELEE_TAKEN: f32 = 0.2;
pub const ARTILLERY_IMPACT_TAKEN: f32 = 0.2;
pub const ARTILLERY_EXPLOSION_TAKEN: f32 = 0.05;

pub const GAME_OVER_COMMAND: &str = "gameover";

// SuperDS duel.
pub const JUMP_CHARGE_INTERVAL_MS: u64 = 15_000;
pub const STRIKER_FIRE_AMMO_INTERVAL_MS: u64 = 30_000;
pub const SUPERDS_UPDATE_MS: u64 = 1_000;
pub const SHOCK_RANGE: f32 = 40.0;
pub const JUMP_SHOCK_DAMAGE: f32 = 45.0;
pub const JUMP_SHOCK_STUN_MS: u64 = 2_000;
pub const VULNERABILITY_MS: u64 = 3_000;
pub const VULNERABILITY_EXTRA_DAMAGE: f32 = 25.0;
pub const COMBO_THRESHOLD: u32 = 3;
pub const COMBO_SHOCK_DAMAGE: f32 = 20.0;
pub const COMBO_SHOCK_STUN_MS: u64 = 500;
pub const SPLIT_DELAY_MS: u64 = 1_000;
pub const SPLIT_GUARD_COUNT: usize = 3;

pub const STRIKER_RUN_SPEED: f32 = 1.1;
pub const STRIKER_SPRINT_SPEED: f32 = 1.25;
pub const STRIKER_PROJECTILE_TAKEN: f32 = 0.4;
pub const STRIKER_EXPLOSION_TAKEN: f32 = 0.3;
pub const STRIKER_FIRE_TAKEN: f32 = 0.3;
pub const STRIKER_CRIT_CHANCE: f32 = 3.0;
pub const STRIKER_ENERGY: f32 = 1.2;
pub const STRIKER_RECHARGE: f32 = 1.5;

pub const JUGGERNAUT_SIZE: f32 = 2.0;
pub const JUGGERNAUT_SPEED: f32 = 0.8;
pub const JUGGERNAUT_ENERGY: f32 = 1.3;
pub const JUGGERNAUT_HEALTH: f32 = 1.4;
pub const JUGGERNAUT_MELEE_TAKEN: f32 = 0.4;
pub const JUGGERNAUT_PROJECTILE_TAKEN: f32 = 0.3;
pub const JUGGERNAUT_MELEE_POWER: f32 = 3.2;

// Ujiri roster.
pub const UJIRI_UPDATE_MS: u64 = 100;
pub const UJIRI_ROSTER_SIZE: usize = 7;
pub const TIMPA_KILL_WINDOW_MS: u64 = 3_000;
pub const TIMPA_BOOST_MS: u64 = 10_000;
pub const TIMPA_LOW_HEALTH_RATIO: f32 = 0.3;
pub const BICHI_DRONE_INTERVAL_MS: u64 = 13_000;
pub const KOKOLA_MINION_INTERVAL_MS: u64 = 7_000;
pub const KOKOLA_MINION_HEALTH: i32 = 15;
pub const KOKOLA_MINION_SIZE: f32 = 0.88;
pub const KOKOLA_MINION_DAMAGE: f32 = 0.3;
pub const EDUR_MIN_SIZE: f32 = 0.5;
pub const EDUR_MAX_SPEED: f32 = 2.5;
pub const XRAY_LASER_INTERVAL_MS: u64 = 10_000;
pub const PAKHI_REGEN_INTERVAL_MS: u64 = 500;
pub const PAKHI_REGEN_AMOUNT: f32 = 1.0;
pub const PSYTHIC_FULL_DURATION_MS: u64 = 10_000;
pub const PSYTHIC_FULL_HEALTH_FACTOR: i32 = 4;
pub const PSYTHIC_GIB_PERCENT: u32 = 40;
pub const PSYTHIC_STUN_PERCENT: u32 = 85;
pub const PSYTHIC_STUN_MS: u64 = 500;
pub const PSYTHIC_SIZE: f32 = 0.7;
pub const PSYTHIC_RUN_SPEED: f32 = 2.5;
pub const PSYTHIC_SPRINT_SPEED: f32 = 4.0;

pub const TRANSFORM_RUN_FACTOR: f32 = 1.35;
pub const TRANSFORM_SPRINT_FACTOR: f32 = 1.45;
pub const LEAD_RUN_SPEED: f32 = 1.15;
pub const LEAD_SPRINT_SPEED: f32 = 1.3;
pub const LEAD_ENERGY_FACTOR: f32 = 1.2;
pub const LEAD_RECHARGE_FACTOR: f32 = 1.2;
pub const SECOND_SIZE: f32 = 1.12;
pub const SECOND_RUN_SPEED: f32 = 0.8;
pub const SECOND_SPRINT_SPEED: f32 = 0.95;
pub const SECOND_MELEE_FORCE: f32 = 1.2;
pub const SECOND_MELEE_DAMAGE: f32 = 1.4;

// Regeneration.
pub const REGEN_UPDATE_MS: u64 = 500;
pub const HUMAN_REGEN_DELAY_MS: u64 = 1_500;
pub const HUMAN_REGEN_COOLDOWN_MS: u64 = 1_500;
pub const HUMAN_REGEN_PERCENT: f32 = 0.05;
pub const BOT_REGEN_DELAY_MS: u64 = 500;
pub const BOT_REGEN_COOLDOWN_MS: u64 = 500;
pub const BOT_REGEN_PERCENT: f32 = 0.03;

// Coop restart.
pub const COOP_EARLY_DEATH_MS: u64 = 10_000;
pub const COOP_HUMAN_CHECK_MS: u64 = 500;

// Bedwars.
pub const BEDWARS_OBJECTIVE_HEALTH: f32 = 200.0;
pub const BEDWARS_OBJECTIVE_TAG: &str = "WpnGrenadesThrown";
pub const BEDWARS_WINNER_CHECK_MS: u64 = 2_000;
pub const BEDWARS_GAME_OVER_DELAY_MS: u64 = 3_000;

// Ninja era.
pub const NINJA_UPDATE_MS: u64 = 200;
pub const NINJA_INFINITE_AMMO_COMMAND: &str = "infinite_ammo 1";
pub const NINJA_REMOVED_TAGS: [&str; 2] = ["WpnSpawnTrigger", "SupplyCrate00"];
pub const UCHIHA_SLOWMO_INTERVAL_MS: u64 = 20_000;
pub const SUSANO_HEALTH_RATIO: f32 = 0.3;
pub const SUSANO_DURATION_MS: u64 = 10_000;
pub const SUSANO_RECOVERY_MS: u64 = 30_000;
pub const SUSANO_SIZE: f32 = 1.3;
pub const SUSANO_DAMAGE_TAKEN: f32 = 0.5;
pub const SUSANO_MELEE_DEALT: f32 = 1.5;
