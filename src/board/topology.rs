//! Board topology: the static field graph and the path rules.
//!
//! ## Layout
//!
//! The board is four identical blocks of 24 fields, one per color, in
//! seating order. Within the block at offset `o`:
//!
//! - `o+0 .. o+3`: home lane, `o+0` is the terminal field;
//! - `o+4`: branch field, next is `[o+5, o+3]`;
//! - `o+5`: start field;
//! - `o+6 .. o+19`: loop fields, `o+19` leads to the next block's `o+4`;
//! - `o+20 .. o+23`: wait fields.
//!
//! ## Paths
//!
//! [`Board::path_for_marble`] walks `next` links forward or `previous` links
//! backward. A marble sitting on its own start field and any marble in a home
//! lane block the way; nothing passes or lands on them.

use smallvec::{smallvec, SmallVec};

use super::field::{
    Field, FieldId, FieldKind, Marble, MarbleId, Path, BLOCK_SIZE, BRANCH_OFFSET, FIELD_COUNT,
    LAST_PATH_OFFSET, MARBLES_PER_COLOR, MARBLE_COUNT, START_OFFSET, WAIT_OFFSET,
};
use super::state::BoardState;
use crate::core::{Color, Table, PLAYER_COUNT};

/// Fields on the shared loop (branch, start and path fields of every block).
const LOOP_LEN: usize = PLAYER_COUNT * (LAST_PATH_OFFSET - BRANCH_OFFSET + 1);

/// Progress value of a marble on its start field.
const START_PROGRESS: u8 = MARBLES_PER_COLOR as u8;

/// Progress value of the first home field.
const HOME_PROGRESS: u8 = START_PROGRESS + LOOP_LEN as u8;

/// Static board graph, built once per seating and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    colors: [Color; PLAYER_COUNT],
    fields: Vec<Field>,
    marbles: Vec<Marble>,
    /// Per block: progress of a marble of that color on each field.
    progress: Vec<[u8; FIELD_COUNT]>,
}

impl Board {
    /// Build the board for a seating; blocks follow the seating order.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        let colors = table.colors();
        let fields = (0..FIELD_COUNT)
            .map(|i| build_field(FieldId(i as u8), &colors))
            .collect();
        let marbles = (0..MARBLE_COUNT)
            .map(|i| Marble {
                id: MarbleId(i as u8),
                raw_id: (i % MARBLES_PER_COLOR) as u8,
                color: colors[i / MARBLES_PER_COLOR],
            })
            .collect();
        let progress = (0..PLAYER_COUNT).map(progress_table).collect();

        Self {
            colors,
            fields,
            marbles,
            progress,
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn marble(&self, id: MarbleId) -> &Marble {
        &self.marbles[id.index()]
    }

    #[must_use]
    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    /// Colors in block order.
    #[must_use]
    pub fn colors(&self) -> [Color; PLAYER_COUNT] {
        self.colors
    }

    fn block_of(&self, color: Color) -> usize {
        self.colors
            .iter()
            .position(|&c| c == color)
            .unwrap_or_else(|| unreachable!("every color has a block"))
    }

    fn block_field(&self, color: Color, offset: usize) -> FieldId {
        FieldId((self.block_of(color) * BLOCK_SIZE + offset) as u8)
    }

    /// Marbles of a color in stable order; the position is the marble's raw id.
    #[must_use]
    pub fn marbles_with_color(&self, color: Color) -> &[Marble] {
        let first = self.block_of(color) * MARBLES_PER_COLOR;
        &self.marbles[first..first + MARBLES_PER_COLOR]
    }

    #[must_use]
    pub fn start_field(&self, color: Color) -> FieldId {
        self.block_field(color, START_OFFSET)
    }

    /// Terminal home field: the one without successors.
    #[must_use]
    pub fn last_home_field(&self, color: Color) -> FieldId {
        self.block_field(color, 0)
    }

    #[must_use]
    pub fn wait_fields(&self, color: Color) -> [FieldId; MARBLES_PER_COLOR] {
        std::array::from_fn(|i| self.block_field(color, WAIT_OFFSET + i))
    }

    /// Home lane from the terminal field outward.
    #[must_use]
    pub fn home_fields(&self, color: Color) -> [FieldId; MARBLES_PER_COLOR] {
        std::array::from_fn(|i| self.block_field(color, i))
    }

    // === State queries ===

    /// Lowest-numbered free wait field of a color.
    #[must_use]
    pub fn empty_wait_field(&self, color: Color, state: &BoardState) -> Option<FieldId> {
        self.wait_fields(color)
            .into_iter()
            .find(|&f| !state.is_occupied(f))
    }

    /// All four marbles of `color` are in the home lane.
    #[must_use]
    pub fn is_color_finished(&self, color: Color, state: &BoardState) -> bool {
        self.marbles_with_color(color)
            .iter()
            .all(|m| self.field(state.field_of(m.id)).is_home())
    }

    /// Whether a marble standing on `field` can be neither passed nor hit.
    #[must_use]
    pub fn is_blocking(&self, field: FieldId, state: &BoardState) -> bool {
        let Some(occupant) = state.marble_on(field) else {
            return false;
        };
        let field = self.field(field);
        field.is_home() || field.is_start_of(self.marble(occupant).color)
    }

    /// Fields traversed by `marble` moving `steps` fields (negative moves
    /// backward), from-field excluded.
    ///
    /// Empty when the marble waits, `steps` is zero, or the full distance is
    /// overrun or blocked. With `allow_shorter` the longest legal prefix is
    /// returned instead.
    #[must_use]
    pub fn path_for_marble(
        &self,
        marble: MarbleId,
        steps: i8,
        state: &BoardState,
        allow_shorter: bool,
    ) -> Path {
        let color = self.marble(marble).color;
        let from = self.field(state.field_of(marble));
        let mut path = Path::new();

        if steps == 0 || from.is_wait() || (steps < 0 && from.is_home()) {
            return path;
        }

        let wanted = steps.unsigned_abs() as usize;
        let mut current = from.id;
        while path.len() < wanted {
            let step = if steps > 0 {
                self.next_for(color, current)
            } else {
                self.field(current).previous.first().copied()
            };
            match step {
                Some(field) if !self.is_blocking(field, state) => {
                    path.push(field);
                    current = field;
                }
                _ => break,
            }
        }

        if path.len() == wanted || allow_shorter {
            path
        } else {
            Path::new()
        }
    }

    fn next_for(&self, color: Color, field: FieldId) -> Option<FieldId> {
        match self.field(field).next.as_slice() {
            [] => None,
            [only] => Some(*only),
            [cont, home, ..] => {
                if self.field(*home).color == Some(color) {
                    Some(*home)
                } else {
                    Some(*cont)
                }
            }
        }
    }

    // === Ranking ===

    /// How far along its own journey a marble of `color` on `field` is:
    /// wait 0..=3, start 4, loop 5..=67, home 68..=71.
    #[must_use]
    pub fn progress(&self, color: Color, field: FieldId) -> u8 {
        self.progress[self.block_of(color)][field.index()]
    }

    /// Number of other marbles of the same color further along. The most
    /// advanced marble has rank 0.
    #[must_use]
    pub fn rank(&self, marble: MarbleId, state: &BoardState) -> u8 {
        let color = self.marble(marble).color;
        let own = self.progress(color, state.field_of(marble));
        self.marbles_with_color(color)
            .iter()
            .filter(|m| m.id != marble && self.progress(color, state.field_of(m.id)) > own)
            .count() as u8
    }
}

fn build_field(id: FieldId, colors: &[Color; PLAYER_COUNT]) -> Field {
    let block = id.block();
    let offset = id.offset();
    let base = block * BLOCK_SIZE;
    let at = |o: usize| FieldId((base + o) as u8);
    let prev_block = (block + PLAYER_COUNT - 1) % PLAYER_COUNT;
    let next_block = (block + 1) % PLAYER_COUNT;
    let color = colors[block];

    let (kind, field_color, next, previous): (_, _, SmallVec<_>, SmallVec<_>) = match offset {
        0 => (FieldKind::Home, Some(color), smallvec![], smallvec![at(1)]),
        1..=3 => (
            FieldKind::Home,
            Some(color),
            smallvec![at(offset - 1)],
            smallvec![if offset == 3 { at(BRANCH_OFFSET) } else { at(offset + 1) }],
        ),
        BRANCH_OFFSET => (
            FieldKind::Path,
            None,
            smallvec![at(START_OFFSET), at(3)],
            smallvec![FieldId((prev_block * BLOCK_SIZE + LAST_PATH_OFFSET) as u8)],
        ),
        START_OFFSET => (
            FieldKind::Start,
            Some(color),
            smallvec![at(START_OFFSET + 1)],
            smallvec![at(BRANCH_OFFSET)],
        ),
        LAST_PATH_OFFSET => (
            FieldKind::Path,
            None,
            smallvec![FieldId((next_block * BLOCK_SIZE + BRANCH_OFFSET) as u8)],
            smallvec![at(offset - 1)],
        ),
        o if o < WAIT_OFFSET => (
            FieldKind::Path,
            None,
            smallvec![at(o + 1)],
            smallvec![at(o - 1)],
        ),
        _ => (FieldKind::Wait, Some(color), smallvec![], smallvec![]),
    };

    Field {
        id,
        kind,
        color: field_color,
        next,
        previous,
    }
}

/// Progress of a marble belonging to `block` on every field of the board.
fn progress_table(block: usize) -> [u8; FIELD_COUNT] {
    let mut table = [0u8; FIELD_COUNT];
    let loop_pos = |b: usize, o: usize| b * (LAST_PATH_OFFSET - BRANCH_OFFSET + 1) + o - BRANCH_OFFSET;
    let start = loop_pos(block, START_OFFSET);

    for b in 0..PLAYER_COUNT {
        for o in BRANCH_OFFSET..=LAST_PATH_OFFSET {
            let distance = (loop_pos(b, o) + LOOP_LEN - start) % LOOP_LEN;
            table[b * BLOCK_SIZE + o] = START_PROGRESS + distance as u8;
        }
    }

    let base = block * BLOCK_SIZE;
    for i in 0..MARBLES_PER_COLOR {
        table[base + WAIT_OFFSET + i] = i as u8;
        // o+3 is entered first, o+0 last
        table[base + 3 - i] = HOME_PROGRESS + i as u8;
    }
    table
}
