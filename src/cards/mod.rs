//! Cards and card piles.
//!
//! ## Key Types
//!
//! - `Card`: suit + value, with a stable id `suit * 13 + value - 1`
//! - `CardState`: stock, per-player hands and discard for one shared deck,
//!   plus the per-player card array used as an observation

pub mod card;
pub mod state;

pub use card::{Card, CardId, CardValue, Suit, DECK_SIZE, VALUES_PER_SUIT};
pub use state::{CardState, CARD_STATE_LEN};
