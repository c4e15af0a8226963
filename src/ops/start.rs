//! Start: a waiting marble enters the start field.

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
    state: &BoardState,
) -> Vec<Move> {
    let board = ctx.board;
    let start = board.start_field(color);

    let Some(marble) = board
        .marbles_with_color(color)
        .iter()
        .find(|m| board.field(state.field_of(m.id)).is_wait())
    else {
        return Vec::new();
    };

    // Own and partner marbles on the start field cannot be hit.
    if let Some(occupant) = state.marble_on(start) {
        let occupant_color = board.marble(occupant).color;
        if occupant_color == color || occupant_color == ctx.table.partner_color(color) {
            return Vec::new();
        }
    }

    let from = state.field_of(marble.id);
    let marble_move = MarbleMove::jump(marble.id, from, start).with_hit(ctx.hit_at(start, state));
    vec![Move::new(MoveType::Start, player, card, smallvec![marble_move])]
}
