//! Core building blocks: player identity, per-player storage, the
//! randomness capability, configuration, and the match log.

pub mod config;
pub mod log;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use log::MatchLog;
pub use player::{PlayerId, PlayerPair};
pub use rng::{pick_one, shuffle, GameRng, RandomSource};
