//! The board: static topology plus the mutable marble placement.
//!
//! ## Board
//!
//! 96 fields in four color blocks. Built once per seating and never mutated;
//! every query that depends on occupancy takes a `&BoardState`.
//!
//! ## BoardState
//!
//! Bijection between marbles and fields. Cheap to clone, so move generation
//! can try a partial move on a scratch copy.

mod field;
mod state;
mod topology;

pub use field::{
    Field, FieldId, FieldKind, Marble, MarbleId, Path, BLOCK_SIZE, FIELD_COUNT, MARBLES_PER_COLOR,
    MARBLE_COUNT,
};
pub use state::BoardState;
pub use topology::Board;
