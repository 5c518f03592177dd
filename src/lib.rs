pub mod abilities;
pub mod bedwars;
pub mod constants;
pub mod coop;
pub mod host;
pub mod militia;
pub mod mode;
pub mod ninja;
pub mod profiles;
pub mod regen;
pub mod rng;
pub mod roster;
pub mod scheduler;
pub mod sim;
pub mod superds;
pub mod types;
pub mod ujiri;
