//! Players, seats, colors and teams.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. The player index equals the seat index, so
//! `PlayerId(0)` always sits North and turn order is plain index order.
//!
//! ## PlayerMap
//!
//! One value per seat, used for hands and reward vectors.
//!
//! ## Table
//!
//! The seating of a game: four players in compass order, two diagonal teams.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a Keez table.
pub const PLAYER_COUNT: usize = 4;

/// Player identifier, 0-based and equal to the seat index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use keez_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player seated `offset` places further in turn order.
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        Self(((self.0 as usize + offset) % PLAYER_COUNT) as u8)
    }

    /// The next player in compass order.
    #[must_use]
    pub const fn next(self) -> Self {
        self.offset(1)
    }

    /// The diagonal partner.
    #[must_use]
    pub const fn team_mate(self) -> Self {
        self.offset(2)
    }

    /// Seats between `self` and `other`, counted in turn order.
    #[must_use]
    pub const fn seats_to(self, other: PlayerId) -> usize {
        (other.0 as usize + PLAYER_COUNT - self.0 as usize) % PLAYER_COUNT
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use keez_engine::core::{PlayerId, PlayerMap, PLAYER_COUNT};
///
/// let mut hand_sizes = PlayerMap::with_value(PLAYER_COUNT, 5usize);
/// hand_sizes[PlayerId::new(3)] -= 1;
/// assert_eq!(hand_sizes.values().sum::<usize>(), 19);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T>(Vec<T>);

impl<T> PlayerMap<T> {
    /// Panics unless `player_count` is in `1..=255`.
    pub fn new(player_count: usize, value_for: impl Fn(PlayerId) -> T) -> Self {
        assert!(
            (1..=usize::from(u8::MAX)).contains(&player_count),
            "player count must be in 1..=255"
        );
        Self(PlayerId::all(player_count).map(value_for).collect())
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.0[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.0.len()).zip(&self.0)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all(self.0.len()).zip(&mut self.0)
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.0[player.index()]
    }
}

/// Marble and field color. Each player plays one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Blue,
    Yellow,
}

impl Color {
    /// All colors in declaration order.
    pub const ALL: [Color; 4] = [Color::Green, Color::Red, Color::Blue, Color::Yellow];

    /// Single-letter tag used by the textual render.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Green => "Green",
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
        };
        f.write_str(name)
    }
}

/// Compass seat. Turn order is North, East, South, West.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    /// Seats in turn order.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Seat for a player index.
    #[must_use]
    pub const fn of(player: PlayerId) -> Self {
        Self::ALL[player.index() % PLAYER_COUNT]
    }
}

/// Team identifier: `0` for North/South, `1` for East/West.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Team of a seated player.
    #[must_use]
    pub const fn of(player: PlayerId) -> Self {
        Self(player.0 % 2)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub seat: Seat,
}

impl Player {
    /// Create a player at the seat given by `id`.
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            seat: Seat::of(id),
        }
    }

    #[must_use]
    pub fn team(&self) -> TeamId {
        TeamId::of(self.id)
    }

    #[must_use]
    pub fn team_mate(&self) -> PlayerId {
        self.id.team_mate()
    }
}

/// Two diagonally seated players sharing a win condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub members: [PlayerId; 2],
}

/// Seating of a game: players in compass order plus the two teams.
///
/// ```
/// use keez_engine::core::{Color, PlayerId, Table};
///
/// let table = Table::standard();
/// assert_eq!(table.player(PlayerId::new(0)).color, Color::Green);
/// assert_eq!(table.player_with_color(Color::Blue), PlayerId::new(2));
/// assert_eq!(table.partner_color(Color::Green), Color::Blue);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    players: Vec<Player>,
    teams: [Team; 2],
}

impl Table {
    /// Seat four players with the given colors in compass order.
    ///
    /// Panics if a color appears twice.
    pub fn new(seating: [(&str, Color); PLAYER_COUNT]) -> Self {
        for (i, (_, color)) in seating.iter().enumerate() {
            assert!(
                !seating[..i].iter().any(|(_, c)| c == color),
                "Each color may only be seated once"
            );
        }

        let players: Vec<Player> = seating
            .iter()
            .enumerate()
            .map(|(i, (name, color))| Player::new(PlayerId(i as u8), *name, *color))
            .collect();

        let team_name = |a: usize, b: usize| format!("{}{}", players[a].name, players[b].name);
        let teams = [
            Team {
                id: TeamId(0),
                name: team_name(0, 2),
                members: [PlayerId(0), PlayerId(2)],
            },
            Team {
                id: TeamId(1),
                name: team_name(1, 3),
                members: [PlayerId(1), PlayerId(3)],
            },
        ];

        Self { players, teams }
    }

    /// Green North, Red East, Blue South, Yellow West.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([
            ("Green", Color::Green),
            ("Red", Color::Red),
            ("Blue", Color::Blue),
            ("Yellow", Color::Yellow),
        ])
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0 as usize]
    }

    #[must_use]
    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    /// Colors in seating order; the board lays its blocks out in this order.
    #[must_use]
    pub fn colors(&self) -> [Color; PLAYER_COUNT] {
        [
            self.players[0].color,
            self.players[1].color,
            self.players[2].color,
            self.players[3].color,
        ]
    }

    /// The player owning a color.
    #[must_use]
    pub fn player_with_color(&self, color: Color) -> PlayerId {
        self.players
            .iter()
            .find(|p| p.color == color)
            .map(|p| p.id)
            .unwrap_or_else(|| unreachable!("every color is seated"))
    }

    /// The other color of the team `color` belongs to.
    #[must_use]
    pub fn partner_color(&self, color: Color) -> Color {
        let owner = self.player(self.player_with_color(color));
        self.player(owner.team_mate()).color
    }

    /// Whether two colors play for the same team.
    #[must_use]
    pub fn same_team(&self, a: Color, b: Color) -> bool {
        let team = |color: Color| self.player(self.player_with_color(color)).team();
        team(a) == team(b)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::standard()
    }
}
