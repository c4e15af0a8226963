//! Core types: players, seating, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these; nothing here knows about
//! the board or the cards' meaning.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, Variant};
pub use error::EngineError;
pub use player::{Color, Player, PlayerId, PlayerMap, Seat, Table, Team, TeamId, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
