//! Switch: an own marble trades places with a marble of another color.

use smallvec::smallvec;

use super::OpContext;
use crate::board::{BoardState, FieldId};
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
    let partner = ctx.table.partner_color(color);
    let in_play = |field: FieldId| {
        let field = board.field(field);
        !field.is_wait() && !field.is_home()
    };

    let mut found = Vec::new();
    for own in board.marbles_with_color(color) {
        let own_field = state.field_of(own.id);
        if !in_play(own_field) {
            continue;
        }

        for other in board.marbles().iter().filter(|m| m.color != color) {
            let other_field = state.field_of(other.id);
            if !in_play(other_field) {
                continue;
            }
            if other.color == partner && board.field(other_field).is_start_of(partner) {
                continue;
            }

            found.push(Move::new(
                MoveType::Switch,
                player,
                card,
                smallvec![
                    MarbleMove::jump(own.id, own_field, other_field),
                    MarbleMove::jump(other.id, other_field, own_field),
                ],
            ));
        }
    }
    found
}
