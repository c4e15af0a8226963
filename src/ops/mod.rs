//! Card operations: what a card lets a player do with the marbles.
//!
//! ## Operations
//!
//! - `Start`: bring a waiting marble onto the start field
//! - `Run(n)`: move one marble `n` fields, backward when negative
//! - `Split(n)`: divide `n` steps over one or two marbles
//! - `Switch`: swap an own marble with a marble of another color
//!
//! Every operation is a pure enumeration over a `&BoardState`: it never
//! mutates, never fails, and returns an empty list when nothing is legal.
//! The `color` argument is the color being played, which is the team mate's
//! once the player's own marbles are all home.

mod run;
mod split;
mod start;
mod switch;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, FieldId, MARBLES_PER_COLOR};
use crate::cards::Card;
use crate::core::{Color, PlayerId, Table};
use crate::moves::{MarbleMove, Move, MoveType};

/// Read-only collaborators shared by every operation.
#[derive(Clone, Copy, Debug)]
pub struct OpContext<'a> {
    pub board: &'a Board,
    pub table: &'a Table,
}

impl<'a> OpContext<'a> {
    #[must_use]
    pub fn new(board: &'a Board, table: &'a Table) -> Self {
        Self { board, table }
    }

    /// The marble on `field`, if any, sent back to a free wait field.
    #[must_use]
    pub(crate) fn hit_at(&self, field: FieldId, state: &BoardState) -> Option<MarbleMove> {
        let occupant = state.marble_on(field)?;
        let color = self.board.marble(occupant).color;
        let wait = self.board.empty_wait_field(color, state)?;
        Some(MarbleMove::jump(occupant, field, wait))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardOp {
    Start,
    Run(i8),
    Split(u8),
    Switch,
}

impl CardOp {
    #[must_use]
    pub const fn move_type(self) -> MoveType {
        match self {
            CardOp::Start => MoveType::Start,
            CardOp::Run(_) => MoveType::Run,
            CardOp::Split(_) => MoveType::Split,
            CardOp::Switch => MoveType::Switch,
        }
    }

    /// Every legal move this operation allows with `card`.
    #[must_use]
    pub fn get_moves(
        self,
        ctx: &OpContext<'_>,
        player: PlayerId,
        color: Color,
        card: Card,
        state: &BoardState,
    ) -> Vec<Move> {
        match self {
            CardOp::Start => start::moves(ctx, player, color, card, state),
            CardOp::Run(steps) => run::moves(ctx, player, color, card, steps, state),
            CardOp::Split(steps) => split::moves(ctx, player, color, card, steps, state),
            CardOp::Switch => switch::moves(ctx, player, color, card, state),
        }
    }

    /// Raw actions this operation can produce for a card of face value `value`.
    #[must_use]
    pub fn raw_actions(self, value: u8) -> Vec<String> {
        let prefix = format!("{}{:02}P", self.move_type().code(), value);
        let ranks = 0..MARBLES_PER_COLOR;
        let mut actions = Vec::new();

        match self {
            CardOp::Start | CardOp::Run(_) => {
                actions.extend(ranks.map(|r| format!("{prefix}{r}")));
            }
            CardOp::Split(steps) => {
                actions.extend(ranks.clone().map(|r| format!("{prefix}{r}")));
                for r in ranks.clone() {
                    for first_steps in 1..steps {
                        for other in ranks.clone().filter(|&o| o != r) {
                            actions.push(format!("{prefix}{r}{first_steps}P{other}"));
                        }
                        for other in ranks.clone() {
                            actions.push(format!("{prefix}{r}{first_steps}T{other}"));
                        }
                    }
                }
            }
            CardOp::Switch => {
                for r in ranks.clone() {
                    for rel in ['T', 'A', 'O'] {
                        for other in ranks.clone() {
                            actions.push(format!("{prefix}{r}{rel}{other}"));
                        }
                    }
                }
            }
        }
        actions
    }
}

impl std::fmt::Display for CardOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardOp::Start => f.write_str("start"),
            CardOp::Run(n) => write!(f, "run {}", n),
            CardOp::Split(n) => write!(f, "split {}", n),
            CardOp::Switch => f.write_str("switch"),
        }
    }
}
