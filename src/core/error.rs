//! Engine error type.
//!
//! Illegal marble paths are not errors: path queries return an empty result
//! and move generation simply skips them. Everything here is a rejected
//! request or a broken invariant.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::Card;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("move {raw} by {player} is not allowed in the current state")]
    InvalidMove { player: PlayerId, raw: String },

    #[error("{player} cannot pass while {legal} moves are available")]
    PassNotAllowed { player: PlayerId, legal: usize },

    #[error("the game is already over")]
    GameOver,

    #[error("stock is empty")]
    EmptyStock,

    #[error("{player} does not hold {card}")]
    CardNotInHand { player: PlayerId, card: Card },

    #[error("{player} played no cards")]
    NoCardsPlayed { player: PlayerId },

    #[error("unknown raw action {0:?}")]
    UnknownAction(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}
