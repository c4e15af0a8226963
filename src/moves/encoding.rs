//! Move encodings for agents: raw action ids and action matrices.
//!
//! ## Raw action
//!
//! `TC` and `DL` stand alone. Marble moves encode as type code, two-digit
//! card value, `P` and the rank of the acting marble (0 = most advanced of
//! its color). A split over two marbles appends the first marble's steps,
//! then a relation letter and the second marble's rank; a switch appends the
//! relation and rank of the marble switched with.
//!
//! Relations, seen from the acting player:
//!
//! - `P`: same color as the acting marble
//! - `T`: the player's own team
//! - `A`: the opponent seated next
//! - `O`: the other opponent
//!
//! ## Action matrix
//!
//! 68 bits: the 52 card ids, then `relative_seat * 4 + rank` for every moved
//! or hit marble, where the acting player's seat is 0.

use super::model::{Move, MoveType};
use crate::board::{Board, BoardState, MarbleId, MARBLES_PER_COLOR};
use crate::cards::DECK_SIZE;
use crate::core::{Color, PlayerId, Table, PLAYER_COUNT};

/// Length of an action matrix.
pub const ACTION_MATRIX_LEN: usize = DECK_SIZE + PLAYER_COUNT * MARBLES_PER_COLOR;

/// Pass id. Reserved in the vocabulary; a pass has no `Move`.
pub const PASS_ACTION: &str = "NO";

/// Relation letter of `other` as seen by `player` acting with `acting` color.
#[must_use]
pub fn relation(table: &Table, player: PlayerId, acting: Color, other: Color) -> char {
    if other == acting {
        'P'
    } else if table.same_team(table.player(player).color, other) {
        'T'
    } else if table.player(player.next()).color == other {
        'A'
    } else {
        'O'
    }
}

/// Raw action of `mv` for the placement it was generated from.
#[must_use]
pub fn raw_action(mv: &Move, board: &Board, table: &Table, state: &BoardState) -> String {
    // Throw and deal moves relocate no marbles.
    let (Some(first), Some(card)) = (mv.marble_moves.first(), mv.card()) else {
        return mv.kind.code().to_string();
    };

    let mut raw = format!(
        "{}{:02}P{}",
        mv.kind.code(),
        card.value.value(),
        board.rank(first.marble, state)
    );

    if let Some(second) = mv.marble_moves.get(1) {
        let acting = board.marble(first.marble).color;
        let other = board.marble(second.marble).color;
        let rel = relation(table, mv.player, acting, other);
        let rank = board.rank(second.marble, state);
        match mv.kind {
            MoveType::Split => raw.push_str(&format!("{}{}{}", first.steps(), rel, rank)),
            MoveType::Switch => raw.push_str(&format!("{}{}", rel, rank)),
            _ => {}
        }
    }
    raw
}

/// Bit index of a marble in the action matrix.
fn marble_bit(board: &Board, table: &Table, player: PlayerId, marble: MarbleId, state: &BoardState) -> usize {
    let owner = table.player_with_color(board.marble(marble).color);
    let seat = player.seats_to(owner);
    DECK_SIZE + seat * MARBLES_PER_COLOR + usize::from(board.rank(marble, state))
}

#[must_use]
pub fn action_matrix(mv: &Move, board: &Board, table: &Table, state: &BoardState) -> Vec<u8> {
    let mut matrix = vec![0u8; ACTION_MATRIX_LEN];
    for card in &mv.cards {
        matrix[card.id.index()] = 1;
    }
    for marble in mv.affected_marbles() {
        matrix[marble_bit(board, table, mv.player, marble, state)] = 1;
    }
    matrix
}
