//! Marble placement.
//!
//! `BoardState` is the mutable half of the board: a bijection between the 16
//! marbles and the fields they occupy. Both directions are stored so lookups
//! are O(1) either way. The only mutator is [`BoardState::place_marble`],
//! which swaps marbles when the target is occupied, so the bijection holds
//! after every call.

use serde::{Deserialize, Serialize};

use super::field::{
    FieldId, MarbleId, BLOCK_SIZE, FIELD_COUNT, MARBLES_PER_COLOR, MARBLE_COUNT, WAIT_OFFSET,
};
use super::topology::Board;
use crate::core::Table;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    field_of: Vec<FieldId>,
    marble_on: Vec<Option<MarbleId>>,
}

impl BoardState {
    /// Every marble on the wait field matching its index within its color.
    #[must_use]
    pub fn initial() -> Self {
        let mut field_of = Vec::with_capacity(MARBLE_COUNT);
        let mut marble_on = vec![None; FIELD_COUNT];

        for marble in 0..MARBLE_COUNT {
            let block = marble / MARBLES_PER_COLOR;
            let raw = marble % MARBLES_PER_COLOR;
            let field = FieldId((block * BLOCK_SIZE + WAIT_OFFSET + raw) as u8);
            field_of.push(field);
            marble_on[field.index()] = Some(MarbleId(marble as u8));
        }

        Self {
            field_of,
            marble_on,
        }
    }

    /// Put every marble back on its wait field.
    pub fn reset(&mut self) {
        *self = Self::initial();
    }

    #[must_use]
    pub fn field_of(&self, marble: MarbleId) -> FieldId {
        self.field_of[marble.index()]
    }

    #[must_use]
    pub fn marble_on(&self, field: FieldId) -> Option<MarbleId> {
        self.marble_on[field.index()]
    }

    #[must_use]
    pub fn is_occupied(&self, field: FieldId) -> bool {
        self.marble_on(field).is_some()
    }

    /// Move `marble` to `field`. A marble already on `field` takes the place
    /// `marble` left.
    pub fn place_marble(&mut self, marble: MarbleId, field: FieldId) {
        let from = self.field_of(marble);
        if from == field {
            return;
        }

        let displaced = self.marble_on(field);
        if let Some(other) = displaced {
            self.field_of[other.index()] = from;
        }
        self.marble_on[from.index()] = displaced;

        self.field_of[marble.index()] = field;
        self.marble_on[field.index()] = Some(marble);
    }

    /// Iterate over `(field, marble)` for every occupied field.
    pub fn occupied(&self) -> impl Iterator<Item = (FieldId, MarbleId)> + '_ {
        self.marble_on
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|m| (FieldId(i as u8), m)))
    }

    /// One entry per field: `seat + 1` of the player owning the marble on it,
    /// 0 when empty.
    #[must_use]
    pub fn board_array(&self, board: &Board, table: &Table) -> Vec<u8> {
        let mut array = vec![0u8; FIELD_COUNT];
        for (field, marble) in self.occupied() {
            let owner = table.player_with_color(board.marble(marble).color);
            array[field.index()] = owner.0 + 1;
        }
        array
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection(state: &BoardState) {
        for m in 0..MARBLE_COUNT as u8 {
            let field = state.field_of(MarbleId(m));
            assert_eq!(state.marble_on(field), Some(MarbleId(m)));
        }
        assert_eq!(state.occupied().count(), MARBLE_COUNT);
    }

    #[test]
    fn test_initial_placement() {
        let state = BoardState::initial();
        assert_eq!(state.field_of(MarbleId(0)), FieldId(20));
        assert_eq!(state.field_of(MarbleId(3)), FieldId(23));
        assert_eq!(state.field_of(MarbleId(4)), FieldId(44));
        assert_eq!(state.field_of(MarbleId(15)), FieldId(95));
        assert_bijection(&state);
    }

    #[test]
    fn test_place_on_empty_field() {
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(0), FieldId(5));

        assert_eq!(state.field_of(MarbleId(0)), FieldId(5));
        assert_eq!(state.marble_on(FieldId(20)), None);
        assert_bijection(&state);
    }

    #[test]
    fn test_place_on_occupied_field_swaps() {
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(0), FieldId(5));
        state.place_marble(MarbleId(8), FieldId(5));

        assert_eq!(state.field_of(MarbleId(8)), FieldId(5));
        assert_eq!(state.field_of(MarbleId(0)), FieldId(68));
        assert_bijection(&state);
    }

    #[test]
    fn test_place_on_own_field_is_noop() {
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(2), FieldId(22));
        assert_eq!(state, BoardState::initial());
    }

    #[test]
    fn test_reset() {
        let mut state = BoardState::initial();
        state.place_marble(MarbleId(5), FieldId(10));
        state.reset();
        assert_eq!(state, BoardState::initial());
    }

    #[test]
    fn test_board_array() {
        let table = Table::standard();
        let board = Board::new(&table);
        let state = BoardState::initial();

        let array = state.board_array(&board, &table);
        assert_eq!(array.len(), 96);
        assert_eq!(array[20], 1);
        assert_eq!(array[44], 2);
        assert_eq!(array[68], 3);
        assert_eq!(array[92], 4);
        assert_eq!(array[5], 0);
    }
}
