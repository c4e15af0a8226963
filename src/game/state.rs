//! Game state and move log.
//!
//! ## GameState
//!
//! Everything that changes during play: marble placement, card piles, whose
//! turn it is, counters, the RNG position and the move log. Card piles and
//! the log are persistent vectors, so cloning a state for the undo stack is
//! cheap.
//!
//! ## Player view
//!
//! `state_for_player` projects a state onto what one player observes: the
//! card array, the occupied fields and the color every player moves with.
//!
//! ## Snapshots
//!
//! `to_bytes` / `from_bytes` round-trip a state through bincode. The RNG is
//! stored as its word position, so a restored state deals the same cards.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Game;
use crate::board::{BoardState, FieldId, MarbleId};
use crate::cards::{Card, CardState};
use crate::core::{Color, EngineError, GameRng, GameRngState, PlayerId, PlayerMap, PLAYER_COUNT};
use crate::moves::MoveType;

/// One applied step, as kept in the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_number: u32,
    pub player: PlayerId,
    /// `None` for a pass.
    pub kind: Option<MoveType>,
    /// Raw action id at the time the move was made.
    pub raw: String,
    pub cards: SmallVec<[Card; 5]>,
    pub hits: usize,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>4} {}: {}", self.move_number, self.player, self.raw)?;
        if self.hits > 0 {
            write!(f, " ({} hit)", self.hits)?;
        }
        Ok(())
    }
}

/// A state as seen from one seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerId,
    /// `CardState::state_array` for `player`.
    pub cards: Vec<u8>,
    /// Occupied fields in field order.
    pub fields_with_marbles: Vec<(FieldId, MarbleId)>,
    /// Color each player moves with; differs from the own color once it is
    /// finished.
    pub play_colors: PlayerMap<Color>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: BoardState,
    pub cards: CardState,
    /// Player to act.
    pub move_player: PlayerId,
    /// Steps applied so far.
    pub move_number: u32,
    /// Deal rounds completed; selects the next hand size.
    pub deal_round: usize,
    rng: GameRngState,
    pub log: Vector<MoveRecord>,
}

impl GameState {
    /// Marbles waiting, deck shuffled into the stock, no cards dealt.
    #[must_use]
    pub fn new(deck: &[Card], seed: u64, first_player: PlayerId) -> Self {
        let mut rng = GameRng::new(seed);
        let cards = CardState::new(deck, PLAYER_COUNT, &mut rng);
        Self {
            board: BoardState::initial(),
            cards,
            move_player: first_player,
            move_number: 0,
            deal_round: 0,
            rng: rng.state(),
            log: Vector::new(),
        }
    }

    #[must_use]
    pub fn rng_state(&self) -> &GameRngState {
        &self.rng
    }

    /// Run `f` with the live RNG and the card piles, then store the RNG
    /// position back.
    pub(crate) fn with_rng<R>(&mut self, f: impl FnOnce(&mut GameRng, &mut CardState) -> R) -> R {
        let mut rng = GameRng::from_state(&self.rng);
        let result = f(&mut rng, &mut self.cards);
        self.rng = rng.state();
        result
    }

    pub fn record(&mut self, record: MoveRecord) {
        self.log.push_back(record);
    }

    #[must_use]
    pub fn state_for_player(&self, game: &Game, player: PlayerId) -> PlayerView {
        PlayerView {
            player,
            cards: self.cards.state_array(player),
            fields_with_marbles: self.board.occupied().collect(),
            play_colors: PlayerMap::new(PLAYER_COUNT, |p| game.play_color(p, self)),
        }
    }

    // === Snapshots ===

    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_SIZE;

    fn new_state() -> GameState {
        GameState::new(&Card::standard_deck(), 7, PlayerId::new(0))
    }

    #[test]
    fn test_new_state() {
        let state = new_state();
        assert_eq!(state.cards.stock().len(), DECK_SIZE);
        assert_eq!(state.board, BoardState::initial());
        assert_eq!(state.move_number, 0);
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_same_seed_same_stock() {
        assert_eq!(new_state().cards, new_state().cards);
        let other = GameState::new(&Card::standard_deck(), 8, PlayerId::new(0));
        assert_ne!(new_state().cards, other.cards);
    }

    #[test]
    fn test_with_rng_advances_position() {
        let mut state = new_state();
        let before = state.rng_state().clone();
        state.with_rng(|rng, cards| cards.reset(rng));
        assert_ne!(state.rng_state(), &before);
        assert_eq!(state.cards.total(), DECK_SIZE);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = new_state();
        state.cards.deal_card(PlayerId::new(2)).unwrap();
        state.record(MoveRecord {
            move_number: 0,
            player: PlayerId::new(0),
            kind: Some(MoveType::Deal),
            raw: "DL".to_string(),
            cards: SmallVec::new(),
            hits: 0,
        });

        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_corrupt_snapshot() {
        let result = GameState::from_bytes(&[1, 2, 3]);
        assert!(matches!(result, Err(EngineError::Snapshot(_))));
    }
}
