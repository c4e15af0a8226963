//! Playing cards.
//!
//! A standard 52-card deck. Card ids are `suit * 13 + value - 1`, which is
//! also the card's bit in a move's action matrix.

use serde::{Deserialize, Serialize};

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Card values per suit.
pub const VALUES_PER_SUIT: usize = 13;

/// Card identifier, 0..52.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Diamonds = 0,
    Hearts = 1,
    Clubs = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardValue {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl CardValue {
    /// All values, Ace first.
    pub const ALL: [CardValue; VALUES_PER_SUIT] = [
        CardValue::Ace,
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
    ];

    /// Face value, Ace = 1 through King = 13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardValue::Ace => "Ace",
            CardValue::Two => "Two",
            CardValue::Three => "Three",
            CardValue::Four => "Four",
            CardValue::Five => "Five",
            CardValue::Six => "Six",
            CardValue::Seven => "Seven",
            CardValue::Eight => "Eight",
            CardValue::Nine => "Nine",
            CardValue::Ten => "Ten",
            CardValue::Jack => "Jack",
            CardValue::Queen => "Queen",
            CardValue::King => "King",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub value: CardValue,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, value: CardValue) -> Self {
        let id = suit as u8 * VALUES_PER_SUIT as u8 + value as u8 - 1;
        Self {
            id: CardId(id),
            suit,
            value,
        }
    }

    /// All 52 cards ordered by id.
    #[must_use]
    pub fn standard_deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| CardValue::ALL.iter().map(move |&value| Card::new(suit, value)))
            .collect()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}
