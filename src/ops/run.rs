//! Run: one marble moves exactly `n` fields.

use smallvec::smallvec;

use super::OpContext;
use crate::board::BoardState;
use crate::cards::Card;
use crate::core::{Color, PlayerId};
use crate::moves::{MarbleMove, Move, MoveType};

pub(super) fn moves(
    ctx: &OpContext<'_>,
    player: PlayerId,
    color: Color,
    card: Card,
    steps: i8,
    state: &BoardState,
) -> Vec<Move> {
    let board = ctx.board;
    let partner = ctx.table.partner_color(color);

    board
        .marbles_with_color(color)
        .iter()
        .filter_map(|marble| {
            let from = state.field_of(marble.id);
            let path = board.path_for_marble(marble.id, steps, state, false);
            let marble_move = MarbleMove::along(marble.id, from, path)?;

            if let Some(occupant) = state.marble_on(marble_move.to) {
                if board.marble(occupant).color == partner {
                    return None;
                }
            }
            let hit = ctx.hit_at(marble_move.to, state);
            Some(Move::new(
                MoveType::Run,
                player,
                card,
                smallvec![marble_move.with_hit(hit)],
            ))
        })
        .collect()
}
