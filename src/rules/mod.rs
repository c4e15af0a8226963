//! Rule sets: which card licenses which operation.
//!
//! A [`Rules`] value owns the card table (face value to operations), the
//! deck composition and the action vocabulary. The vocabulary is derived
//! from the table, so a custom table always gets a matching action space.
//!
//! ## Variants
//!
//! | Card | `Keez` | `KeezSimple` |
//! |------|--------|--------------|
//! | Ace | start, run 1 | start, run 1 |
//! | Four | run -4 | run -4 |
//! | Seven | split 7 | run 7 |
//! | Jack | switch | run 11 |
//! | Queen | run 12 | run 12 |
//! | King | start | start |
//! | others | run value | run value |

mod action_space;

pub use action_space::ActionSpace;

use smallvec::{smallvec, SmallVec};

use crate::cards::{Card, CardValue, VALUES_PER_SUIT};
use crate::core::Variant;
use crate::moves::{MoveType, PASS_ACTION};
use crate::ops::CardOp;

/// Operations per face value, Ace first.
pub type CardTable = [SmallVec<[CardOp; 2]>; VALUES_PER_SUIT];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    table: CardTable,
    action_space: ActionSpace,
}

impl Rules {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_table(Self::card_table(variant))
    }

    /// Rules for a custom card table.
    #[must_use]
    pub fn with_table(table: CardTable) -> Self {
        let mut action_space: ActionSpace = [
            PASS_ACTION,
            MoveType::Deal.code(),
            MoveType::ThrowCards.code(),
        ]
        .into_iter()
        .collect();

        for value in CardValue::ALL {
            for op in &table[usize::from(value.value()) - 1] {
                for action in op.raw_actions(value.value()) {
                    action_space.push(action);
                }
            }
        }

        Self {
            table,
            action_space,
        }
    }

    /// The standard table of a variant.
    #[must_use]
    pub fn card_table(variant: Variant) -> CardTable {
        std::array::from_fn(|i| {
            let value = (i + 1) as u8;
            match (variant, value) {
                (_, 1) => smallvec![CardOp::Start, CardOp::Run(1)],
                (_, 4) => smallvec![CardOp::Run(-4)],
                (Variant::Keez, 7) => smallvec![CardOp::Split(7)],
                (Variant::Keez, 11) => smallvec![CardOp::Switch],
                (_, 13) => smallvec![CardOp::Start],
                (_, v) => smallvec![CardOp::Run(v as i8)],
            }
        })
    }

    /// Operations a card licenses.
    #[must_use]
    pub fn ops_for(&self, value: CardValue) -> &[CardOp] {
        &self.table[usize::from(value.value()) - 1]
    }

    #[must_use]
    pub fn table(&self) -> &CardTable {
        &self.table
    }

    #[must_use]
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// The 52 cards, ordered by id.
    #[must_use]
    pub fn deck(&self) -> Vec<Card> {
        Card::standard_deck()
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
