//! # keez-engine
//!
//! Rule engine for Keez, a four-player, two-team marble race played with a
//! standard deck of cards. Cards license marble moves; a team wins when both
//! partners have brought all their marbles home.
//!
//! ## Design Principles
//!
//! 1. **Exhaustive move generation**: given a card and a placement, every
//!    legal move is enumerated, including two-marble splits, hits and
//!    team-mate substitution.
//!
//! 2. **Pure enumeration, explicit transitions**: operations read a
//!    `&BoardState` and never fail; only `Game::step` changes state, and it
//!    rejects illegal input without mutating anything.
//!
//! 3. **Rules as data**: the card table and the action vocabulary are derived
//!    per variant and can be replaced.
//!
//! ## Architecture
//!
//! - **Arena board**: 96 fields addressed by id, built once per seating.
//!
//! - **Persistent Data Structures**: card piles and the move log use `im`
//!   vectors, so undo snapshots clone in O(1).
//!
//! - **Agent encodings**: raw action ids, a 68-bit action matrix, board and
//!   hand projections for learning agents.
//!
//! ## Modules
//!
//! - `core`: players, seating, RNG, configuration, errors
//! - `board`: field graph, path rules and marble placement
//! - `cards`: cards and card piles
//! - `moves`: move model and encodings
//! - `ops`: card operations (start, run, split, switch)
//! - `rules`: card tables and action vocabularies
//! - `game`: the turn state machine
//!
//! ```
//! use keez_engine::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! let (state, player) = game.init_game().unwrap();
//! let moves = game.get_allowed_moves(&state);
//! assert!(!moves.is_empty());
//!
//! let outcome = game.step(Some(&moves[0]), &state).unwrap();
//! assert_eq!(outcome.state.move_number, 1);
//! assert_eq!(outcome.state.move_player, player.next());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod game;
pub mod moves;
pub mod ops;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Color, EngineError, GameConfig, GameRng, GameRngState, Player, PlayerId, PlayerMap, Seat,
    Table, Team, TeamId, Variant,
};

pub use crate::board::{Board, BoardState, Field, FieldId, FieldKind, Marble, MarbleId};

pub use crate::cards::{Card, CardId, CardState, CardValue, Suit};

pub use crate::moves::{MarbleMove, Move, MoveType};

pub use crate::ops::{CardOp, OpContext};

pub use crate::rules::{ActionSpace, CardTable, Rules};

pub use crate::game::{
    Game, GameResult, GameState, KeezGameBuilder, MoveRecord, Phase, PlayerView, StepOutcome,
};
