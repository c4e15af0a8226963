//! Split: `n` steps divided over one or two marbles.
//!
//! A single own marble may take all `n` steps. Otherwise an own marble `a`
//! takes `n - k` steps for `k` in `1..=n/2`, cut short if the home lane is
//! too short, and a second marble `b` (own or partner color) takes exactly
//! the remainder on the board left by `a`. Landing on any marble that is
//! not protected hits it, own and partner marbles included.

use rustc_hash::FxHashSet;
use smallvec::{smallvec, SmallVec};

use super::OpContext;
use crate::board::{BoardState, FieldId, Marble, MarbleId};
use crate::cards::Card;
use crate::core::{Color, PlayerId};
use crate::moves::{MarbleMove, Move, MoveType};

/// Final placement of every marble a move touches, sorted.
type Outcome = SmallVec<[(MarbleId, FieldId); 4]>;

fn outcome(marble_moves: &[MarbleMove]) -> Outcome {
    let mut placed: Outcome = marble_moves
        .iter()
        .flat_map(|mm| {
            std::iter::once((mm.marble, mm.to)).chain(mm.hits.iter().map(|h| (h.marble, h.to)))
        })
        .collect();
    placed.sort_unstable();
    placed
}

fn travel(
    ctx: &OpContext<'_>,
    marble: MarbleId,
    steps: i8,
    state: &BoardState,
    allow_shorter: bool,
) -> Option<MarbleMove> {
    let path = ctx
        .board
        .path_for_marble(marble, steps, state, allow_shorter);
    let marble_move = MarbleMove::along(marble, state.field_of(marble), path)?;
    let hit = ctx.hit_at(marble_move.to, state);
    Some(marble_move.with_hit(hit))
}

pub(super) fn moves(
    ctx: &OpContext<'_>,
    player: PlayerId,
    color: Color,
    card: Card,
    steps: u8,
    state: &BoardState,
) -> Vec<Move> {
    let board = ctx.board;
    let own = board.marbles_with_color(color);
    let partner = board.marbles_with_color(ctx.table.partner_color(color));
    // No path is longer than an i8 step count
    let Ok(total) = i8::try_from(steps) else {
        return Vec::new();
    };

    let mut seen: FxHashSet<Outcome> = FxHashSet::default();
    let mut found = Vec::new();
    let mut emit = |marble_moves: SmallVec<[MarbleMove; 2]>| {
        if seen.insert(outcome(&marble_moves)) {
            found.push(Move::new(MoveType::Split, player, card, marble_moves));
        }
    };

    for marble in own {
        if let Some(single) = travel(ctx, marble.id, total, state, false) {
            emit(smallvec![single]);
        }
    }

    let on_board = |m: &&Marble| !board.field(state.field_of(m.id)).is_wait();
    for first in own.iter().filter(on_board) {
        for second in own.iter().chain(partner).filter(on_board) {
            if second.id == first.id {
                continue;
            }
            for k in 1..=total / 2 {
                let Some(first_move) = travel(ctx, first.id, total - k, state, true) else {
                    continue;
                };
                let remainder = total - first_move.steps() as i8;
                if remainder == 0 {
                    continue;
                }

                let mut after = state.clone();
                first_move.apply(&mut after);
                if board.field(after.field_of(second.id)).is_wait() {
                    continue;
                }
                if let Some(second_move) = travel(ctx, second.id, remainder, &after, false) {
                    emit(smallvec![first_move, second_move]);
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::cards::{CardValue, Suit};
    use crate::core::Table;

    fn seven() -> Card {
        Card::new(Suit::Clubs, CardValue::Seven)
    }

    fn split(table: &Table, board: &Board, player: u8, state: &BoardState) -> Vec<Move> {
        let ctx = OpContext::new(board, table);
        let player = PlayerId::new(player);
        let color = table.player(player).color;
        moves(&ctx, player, color, seven(), 7, state)
    }

    #[test]
    fn test_split_single_marble() {
        let table = Table::standard();
        let board = Board::new(&table);
        let mut state = BoardState::initial();
        assert!(split(&table, &board, 0, &state).is_empty());

        state.place_marble(MarbleId(0), FieldId(5));
        let found = split(&table, &board, 0, &state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].marble_moves[0].from, FieldId(5));
        assert_eq!(found[0].marble_moves[0].to, FieldId(12));
    }

    #[test]
    fn test_split_beyond_step_range_is_empty() {
        let table = Table::standard();
        let board = Board::new(&table);
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(0), FieldId(5));
        state.place_marble(MarbleId(1), FieldId(29));

        let ctx = OpContext::new(&board, &table);
        let player = PlayerId::new(0);
        assert!(moves(&ctx, player, Color::Green, seven(), 200, &state).is_empty());
        assert!(moves(&ctx, player, Color::Green, seven(), 128, &state).is_empty());
    }

    #[test]
    fn test_split_four_marbles_on_start_fields() {
        let table = Table::standard();
        let board = Board::new(&table);
        let mut state = BoardState::initial();
        for (i, field) in [5u8, 29, 53, 77].into_iter().enumerate() {
            state.place_marble(MarbleId(i as u8), FieldId(field));
        }

        // 4 singles + 12 ordered pairs x 3 divisions
        assert_eq!(split(&table, &board, 0, &state).len(), 40);
    }

    #[test]
    fn test_split_moves_are_unique() {
        let table = Table::standard();
        let board = Board::new(&table);
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(0), FieldId(3));
        state.place_marble(MarbleId(1), FieldId(5));
        state.place_marble(MarbleId(2), FieldId(4));

        let found = split(&table, &board, 0, &state);
        let outcomes: FxHashSet<_> = found.iter().map(|m| outcome(&m.marble_moves)).collect();
        assert_eq!(outcomes.len(), found.len());
        assert_eq!(found.len(), 4);
    }
}
