//! Moves and their agent-facing encodings.

pub mod encoding;
pub mod model;

pub use encoding::{relation, ACTION_MATRIX_LEN, PASS_ACTION};
pub use model::{MarbleMove, Move, MoveType};

use crate::game::{Game, GameState};

impl Move {
    /// Compact textual id, e.g. `RU05P0` or `SP07P25T1`.
    #[must_use]
    pub fn raw_action(&self, game: &Game, state: &GameState) -> String {
        encoding::raw_action(self, game.board(), game.table(), &state.board)
    }

    /// 68-entry 0/1 vector of consumed cards and affected marbles.
    #[must_use]
    pub fn action_matrix(&self, game: &Game, state: &GameState) -> Vec<u8> {
        encoding::action_matrix(self, game.board(), game.table(), &state.board)
    }
}
