//! Move representation.
//!
//! A [`Move`] is what a player does on a turn: which cards it consumes and
//! which marbles it relocates. Each relocation is a [`MarbleMove`], and a
//! marble move that lands on another marble carries the hit as a nested
//! marble move back to a wait field.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::{BoardState, FieldId, MarbleId, Path};
use crate::cards::Card;
use crate::core::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Start,
    Run,
    Split,
    Switch,
    ThrowCards,
    Deal,
}

impl MoveType {
    /// Two-letter code used in raw actions.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            MoveType::Start => "ST",
            MoveType::Run => "RU",
            MoveType::Split => "SP",
            MoveType::Switch => "SW",
            MoveType::ThrowCards => "TC",
            MoveType::Deal => "DL",
        }
    }
}

/// One marble changing field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarbleMove {
    pub marble: MarbleId,
    pub from: FieldId,
    pub to: FieldId,
    /// Fields traversed, from-field excluded, to-field included.
    pub path: Path,
    /// Marbles sent back to their wait fields by this move.
    pub hits: Vec<MarbleMove>,
}

impl MarbleMove {
    /// A move along `path`, ending on its last field. `None` for an empty path.
    #[must_use]
    pub fn along(marble: MarbleId, from: FieldId, path: Path) -> Option<Self> {
        let to = *path.last()?;
        Some(Self {
            marble,
            from,
            to,
            path,
            hits: Vec::new(),
        })
    }

    /// A direct relocation: hits and switches.
    #[must_use]
    pub fn jump(marble: MarbleId, from: FieldId, to: FieldId) -> Self {
        Self {
            marble,
            from,
            to,
            path: smallvec![to],
            hits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hit(mut self, hit: Option<MarbleMove>) -> Self {
        self.hits.extend(hit);
        self
    }

    /// Number of fields travelled.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    /// Apply hits first, then the move itself.
    pub fn apply(&self, state: &mut BoardState) {
        for hit in &self.hits {
            hit.apply(state);
        }
        state.place_marble(self.marble, self.to);
    }
}

impl std::fmt::Display for MarbleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{} {}->{}", self.marble.0, self.from, self.to)?;
        for hit in &self.hits {
            write!(f, " hits [{}]", hit)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveType,
    pub player: PlayerId,
    pub cards: SmallVec<[Card; 5]>,
    pub marble_moves: SmallVec<[MarbleMove; 2]>,
}

impl Move {
    #[must_use]
    pub fn new(
        kind: MoveType,
        player: PlayerId,
        card: Card,
        marble_moves: SmallVec<[MarbleMove; 2]>,
    ) -> Self {
        Self {
            kind,
            player,
            cards: smallvec![card],
            marble_moves,
        }
    }

    /// Give up the whole hand.
    #[must_use]
    pub fn throw_cards(player: PlayerId, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            kind: MoveType::ThrowCards,
            player,
            cards: cards.into_iter().collect(),
            marble_moves: SmallVec::new(),
        }
    }

    /// Deal the next round.
    #[must_use]
    pub fn deal(player: PlayerId) -> Self {
        Self {
            kind: MoveType::Deal,
            player,
            cards: SmallVec::new(),
            marble_moves: SmallVec::new(),
        }
    }

    /// The card that licenses this move, if any.
    #[must_use]
    pub fn card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Every marble the move touches: movers and hit marbles.
    pub fn affected_marbles(&self) -> impl Iterator<Item = MarbleId> + '_ {
        self.marble_moves
            .iter()
            .flat_map(|mm| std::iter::once(mm.marble).chain(mm.hits.iter().map(|h| h.marble)))
    }

    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.marble_moves.iter().map(|mm| mm.hits.len()).sum()
    }

    /// Apply every marble move in order.
    pub fn apply(&self, state: &mut BoardState) {
        for marble_move in &self.marble_moves {
            marble_move.apply(state);
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.player, self.kind)?;
        if let Some(card) = self.card() {
            write!(f, " with {}", card)?;
            if self.cards.len() > 1 {
                write!(f, " (+{})", self.cards.len() - 1)?;
            }
        }
        for marble_move in &self.marble_moves {
            write!(f, "; {}", marble_move)?;
        }
        Ok(())
    }
}
