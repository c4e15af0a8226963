//! Fields and marbles.
//!
//! Fields live in an arena owned by [`Board`](super::Board) and are addressed
//! by [`FieldId`]. Adjacency is stored as ids, never as references, so the
//! board can be shared freely between threads and snapshots.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;

/// Total number of fields on the board.
pub const FIELD_COUNT: usize = 96;

/// Fields per color block: 4 home, 1 branch, 1 start, 14 path, 4 wait.
pub const BLOCK_SIZE: usize = 24;

/// Marbles per color.
pub const MARBLES_PER_COLOR: usize = 4;

/// Total number of marbles.
pub const MARBLE_COUNT: usize = 16;

/// Offsets of the field groups inside a color block.
pub(crate) const BRANCH_OFFSET: usize = 4;
pub(crate) const START_OFFSET: usize = 5;
pub(crate) const LAST_PATH_OFFSET: usize = 19;
pub(crate) const WAIT_OFFSET: usize = 20;

/// Field identifier, 0..96.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub u8);

impl FieldId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Color block this field belongs to.
    #[must_use]
    pub const fn block(self) -> usize {
        self.index() / BLOCK_SIZE
    }

    /// Offset inside the color block.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.index() % BLOCK_SIZE
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marble identifier, 0..16. Marbles of block `b` have ids `4b..4b+3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarbleId(pub u8);

impl MarbleId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a field is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Private holding area; no adjacency.
    Wait,
    /// Entry point onto the shared loop.
    Start,
    /// Shared loop field.
    Path,
    /// Color-private terminal lane.
    Home,
}

/// Ordered fields traversed by a move, from-field excluded.
pub type Path = SmallVec<[FieldId; 16]>;

/// A field of the board graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub kind: FieldKind,
    /// Owning color for wait, start and home fields.
    pub color: Option<Color>,
    /// Successors. The branch field lists `[continue, enter home]`.
    pub next: SmallVec<[FieldId; 2]>,
    pub previous: SmallVec<[FieldId; 2]>,
}

impl Field {
    #[must_use]
    pub fn is_wait(&self) -> bool {
        self.kind == FieldKind::Wait
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.kind == FieldKind::Home
    }

    #[must_use]
    pub fn is_start(&self) -> bool {
        self.kind == FieldKind::Start
    }

    /// Whether this field is the start field of `color`.
    #[must_use]
    pub fn is_start_of(&self, color: Color) -> bool {
        self.is_start() && self.color == Some(color)
    }
}

/// A marble. Its location lives in [`BoardState`](super::BoardState).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marble {
    pub id: MarbleId,
    /// Index within its color, 0..4.
    pub raw_id: u8,
    pub color: Color,
}

impl std::fmt::Display for Marble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.raw_id)
    }
}
