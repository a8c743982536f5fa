//! Core types: players, rooms, RNG, configuration.
//!
//! These are shared by card generation, win detection and the session
//! reconciler.

pub mod config;
pub mod player;
pub mod rng;
pub mod room;

pub use config::{ConfigError, GameConfig, CARD_SIZE, NUMBERS_PER_COLUMN};
pub use player::{fallback_player_name, ClientId, PlayerInfo};
pub use rng::{GameRng, GameRngState};
pub use room::{Room, RoomId};
