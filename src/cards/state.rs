//! Card piles: stock, hands and discard.
//!
//! All piles are `im::Vector` so a `CardState` clones in O(1); the game keeps
//! one per undo snapshot. Every operation preserves the card count: the three
//! piles together always hold the full deck.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit, DECK_SIZE, VALUES_PER_SUIT};
use crate::core::{EngineError, GameRng, PlayerId, PlayerMap, PLAYER_COUNT};

/// Rows in the value matrix: a value can be held 0 to 4 times.
const VALUE_COUNT_ROWS: usize = 5;

/// Length of the per-player card array.
pub const CARD_STATE_LEN: usize = 96;

// Card array layout, see `CardState::state_array`.
const HAND_SIZES: usize = DECK_SIZE;
const PLAYED_COUNT: usize = HAND_SIZES + PLAYER_COUNT;
const STOCK_COUNT: usize = PLAYED_COUNT + 1;
const OWN_VALUES: usize = STOCK_COUNT + 1;
const PLAYED_VALUES: usize = OWN_VALUES + VALUES_PER_SUIT;
const OWN_SUITS: usize = PLAYED_VALUES + VALUES_PER_SUIT;
const PLAYED_SUITS: usize = OWN_SUITS + Suit::ALL.len();
const OWN_SEAT: usize = PLAYED_SUITS + Suit::ALL.len();

/// Where a card sits as seen by one player.
const CARD_IN_HAND: u8 = 1;
const CARD_PLAYED: u8 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    /// Top of the stock is the back of the vector.
    stock: Vector<Card>,
    hands: PlayerMap<Vector<Card>>,
    discard: Vector<Card>,
}

impl CardState {
    /// Shuffled stock, empty hands, empty discard.
    #[must_use]
    pub fn new(cards: &[Card], player_count: usize, rng: &mut GameRng) -> Self {
        let mut stock = cards.to_vec();
        rng.shuffle(&mut stock);
        Self {
            stock: stock.into_iter().collect(),
            hands: PlayerMap::new(player_count, |_| Vector::new()),
            discard: Vector::new(),
        }
    }

    // === Piles ===

    #[must_use]
    pub fn stock(&self) -> &Vector<Card> {
        &self.stock
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.discard
    }

    /// Cards across all piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.stock.len() + self.hands.values().map(Vector::len).sum::<usize>() + self.discard.len()
    }

    #[must_use]
    pub fn all_hands_empty(&self) -> bool {
        self.hands.values().all(Vector::is_empty)
    }

    // === Transitions ===

    /// Move the top stock card into a hand.
    pub fn deal_card(&mut self, player: PlayerId) -> Result<Card, EngineError> {
        let card = self.stock.pop_back().ok_or(EngineError::EmptyStock)?;
        self.hands[player].push_back(card);
        Ok(card)
    }

    /// Move played cards to the discard pile.
    ///
    /// A single card leaves the hand alone. Several cards mean the player
    /// throws in, and the whole hand goes.
    pub fn play_cards(&mut self, player: PlayerId, cards: &[Card]) -> Result<(), EngineError> {
        if cards.is_empty() {
            return Err(EngineError::NoCardsPlayed { player });
        }
        let hand = &mut self.hands[player];
        if let Some(&card) = cards.iter().find(|c| !hand.contains(*c)) {
            return Err(EngineError::CardNotInHand { player, card });
        }

        if let [card] = cards {
            if let Some(pos) = hand.index_of(card) {
                hand.remove(pos);
            }
            self.discard.push_back(*card);
        } else {
            self.discard.append(std::mem::take(hand));
        }
        Ok(())
    }

    /// Gather every card back into the stock and reshuffle.
    pub fn reset(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self
            .stock
            .iter()
            .chain(self.hands.values().flat_map(|h| h.iter()))
            .chain(self.discard.iter())
            .copied()
            .collect();
        cards.sort_by_key(|c| c.id);
        rng.shuffle(&mut cards);

        self.stock = cards.into_iter().collect();
        for (_, hand) in self.hands.iter_mut() {
            hand.clear();
        }
        self.discard.clear();
    }

    // === Projections ===

    /// The card piles as `player` sees them, `CARD_STATE_LEN` entries:
    ///
    /// | slots    | content                                                |
    /// |----------|--------------------------------------------------------|
    /// | 0..52    | per card id: 1 in own hand, 2 played, 0 unseen         |
    /// | 52..56   | hand sizes, counted in seats from `player`             |
    /// | 56       | played cards                                           |
    /// | 57       | stock cards                                            |
    /// | 58..71   | own cards per value, Ace first                         |
    /// | 71..84   | played cards per value                                 |
    /// | 84..88   | own cards per suit                                     |
    /// | 88..92   | played cards per suit                                  |
    /// | 92..96   | one-hot of `player`'s seat                             |
    #[must_use]
    pub fn state_array(&self, player: PlayerId) -> Vec<u8> {
        let mut array = vec![0u8; CARD_STATE_LEN];
        let hand = &self.hands[player];

        for (pile, location, values, suits) in [
            (hand, CARD_IN_HAND, OWN_VALUES, OWN_SUITS),
            (&self.discard, CARD_PLAYED, PLAYED_VALUES, PLAYED_SUITS),
        ] {
            for card in pile {
                array[card.id.index()] = location;
                array[values + usize::from(card.value.value()) - 1] += 1;
                array[suits + card.suit as usize] += 1;
            }
        }

        for (other, cards) in self.hands.iter() {
            array[HAND_SIZES + player.seats_to(other)] = count(cards.len());
        }
        array[PLAYED_COUNT] = count(self.discard.len());
        array[STOCK_COUNT] = count(self.stock.len());
        array[OWN_SEAT + player.index()] = 1;
        array
    }

    /// 5x13 one-hot matrix, flattened column-major: column `v` has a 1 in
    /// the row equal to the number of cards of value `v + 1`.
    #[must_use]
    pub fn value_matrix<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<u8> {
        let mut counts = [0usize; VALUES_PER_SUIT];
        for card in cards {
            counts[usize::from(card.value.value()) - 1] += 1;
        }

        let mut matrix = vec![0u8; VALUE_COUNT_ROWS * VALUES_PER_SUIT];
        for (column, &count) in counts.iter().enumerate() {
            matrix[column * VALUE_COUNT_ROWS + count.min(VALUE_COUNT_ROWS - 1)] = 1;
        }
        matrix
    }
}

fn count(len: usize) -> u8 {
    u8::try_from(len).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardValue, Suit, DECK_SIZE};

    fn setup() -> (CardState, GameRng) {
        let mut rng = GameRng::new(42);
        let state = CardState::new(&Card::standard_deck(), 4, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_initial_state() {
        let (state, _) = setup();
        assert_eq!(state.stock().len(), DECK_SIZE);
        assert!(state.discard().is_empty());
        assert!(state.all_hands_empty());
        assert_eq!(state.total(), DECK_SIZE);
    }

    #[test]
    fn test_deal_card() {
        let (mut state, _) = setup();
        let top = *state.stock().back().unwrap();
        let dealt = state.deal_card(PlayerId::new(0)).unwrap();

        assert_eq!(dealt, top);
        assert_eq!(state.stock().len(), 51);
        assert_eq!(state.hand(PlayerId::new(0)).len(), 1);
        assert_eq!(state.discard().len(), 0);
        assert_eq!(state.total(), DECK_SIZE);
    }

    #[test]
    fn test_deal_from_empty_stock() {
        let (mut state, _) = setup();
        for _ in 0..DECK_SIZE {
            state.deal_card(PlayerId::new(1)).unwrap();
        }
        assert_eq!(state.deal_card(PlayerId::new(1)), Err(EngineError::EmptyStock));
        assert_eq!(state.total(), DECK_SIZE);
    }

    #[test]
    fn test_play_single_card() {
        let (mut state, _) = setup();
        let p0 = PlayerId::new(0);
        let first = state.deal_card(p0).unwrap();
        state.deal_card(p0).unwrap();

        state.play_cards(p0, &[first]).unwrap();
        assert_eq!(state.hand(p0).len(), 1);
        assert_eq!(state.discard().len(), 1);
        assert!(!state.hand(p0).contains(&first));
    }

    #[test]
    fn test_throw_whole_hand_and_reset() {
        let (mut state, mut rng) = setup();
        let p0 = PlayerId::new(0);
        state.deal_card(p0).unwrap();
        state.deal_card(p0).unwrap();
        assert_eq!(state.stock().len(), 50);

        let hand: Vec<Card> = state.hand(p0).iter().copied().collect();
        state.play_cards(p0, &hand).unwrap();
        assert_eq!(state.stock().len(), 50);
        assert!(state.hand(p0).is_empty());
        assert_eq!(state.discard().len(), 2);

        state.reset(&mut rng);
        assert_eq!(state.stock().len(), 52);
        assert!(state.hand(p0).is_empty());
        assert!(state.discard().is_empty());
    }

    #[test]
    fn test_play_card_not_in_hand() {
        let (mut state, _) = setup();
        let p0 = PlayerId::new(0);
        let card = Card::new(Suit::Hearts, CardValue::Two);

        let err = state.play_cards(p0, &[card]).unwrap_err();
        assert_eq!(err, EngineError::CardNotInHand { player: p0, card });
        assert_eq!(state.total(), DECK_SIZE);
    }

    #[test]
    fn test_play_no_cards() {
        let (mut state, _) = setup();
        let p0 = PlayerId::new(0);
        state.deal_card(p0).unwrap();
        state.deal_card(p0).unwrap();

        let err = state.play_cards(p0, &[]).unwrap_err();
        assert_eq!(err, EngineError::NoCardsPlayed { player: p0 });
        assert_eq!(state.hand(p0).len(), 2);
        assert!(state.discard().is_empty());
    }

    #[test]
    fn test_state_array_fresh_deck() {
        let (state, _) = setup();
        let array = state.state_array(PlayerId::new(0));

        assert_eq!(array.len(), CARD_STATE_LEN);
        assert_eq!(array[56], 0);
        assert_eq!(array[57], 52);
        assert!(array[..DECK_SIZE].iter().all(|&slot| slot == 0));
        assert_eq!(array[92..], [1, 0, 0, 0]);
    }

    #[test]
    fn test_state_array_after_play() {
        let (mut state, _) = setup();
        let p0 = PlayerId::new(0);
        let p3 = PlayerId::new(3);
        let kept = state.deal_card(p0).unwrap();
        let played = state.deal_card(p0).unwrap();
        state.deal_card(p3).unwrap();
        state.play_cards(p0, &[played]).unwrap();

        let array = state.state_array(p0);
        assert_eq!(array[kept.id.index()], 1);
        assert_eq!(array[played.id.index()], 2);
        assert_eq!(array[..DECK_SIZE].iter().filter(|&&slot| slot != 0).count(), 2);
        // Own hand first, West three seats on
        assert_eq!(array[52..56], [1, 0, 0, 1]);
        assert_eq!(array[56], 1);
        assert_eq!(array[57], 49);
        assert_eq!(array[58 + usize::from(kept.value.value()) - 1], 1);
        assert_eq!(array[71 + usize::from(played.value.value()) - 1], 1);
        assert_eq!(array[84 + kept.suit as usize], 1);
        assert_eq!(array[88 + played.suit as usize], 1);

        // West sees its own card but not Player 0's
        let west = state.state_array(p3);
        assert_eq!(west[kept.id.index()], 0);
        assert_eq!(west[played.id.index()], 2);
        assert_eq!(west[52..56], [1, 1, 0, 0]);
        assert_eq!(west[92..], [0, 0, 0, 1]);
    }

    #[test]
    fn test_value_matrix() {
        let cards = [
            Card::new(Suit::Hearts, CardValue::Ace),
            Card::new(Suit::Clubs, CardValue::Ace),
            Card::new(Suit::Spades, CardValue::King),
        ];
        let matrix = CardState::value_matrix(&cards);

        assert_eq!(matrix.len(), 65);
        assert_eq!(matrix.iter().map(|&b| b as usize).sum::<usize>(), 13);
        // Ace column: count 2
        assert_eq!(matrix[2], 1);
        // Two column: count 0
        assert_eq!(matrix[5], 1);
        // King column: count 1
        assert_eq!(matrix[12 * 5 + 1], 1);
    }
}
