//! Game configuration.
//!
//! `GameConfig` selects the rule variant, the deal schedule and the seed for
//! deck shuffling. Configuration is plain data: `Default` gives the standard
//! game, `with_*` methods adjust it, `validate` rejects impossible setups.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::player::{PlayerId, PLAYER_COUNT};
use crate::cards::DECK_SIZE;

/// Rule variant. Determines the card table and the action vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Full game: Seven splits, Jack switches. 271 raw actions.
    #[default]
    Keez,
    /// Every non-start card runs its face value (Four runs backwards).
    KeezSimple,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rule variant.
    pub variant: Variant,

    /// Seed for deck shuffling. Same seed, same deals.
    pub seed: u64,

    /// Cards dealt to each player per round, cycling.
    /// The default 5, 4, 4 uses the whole deck exactly once per cycle.
    pub deal_schedule: Vec<usize>,

    /// Player who moves first after the opening deal.
    pub first_player: PlayerId,

    /// Record prior states so `step_back` can undo.
    pub allow_step_back: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Keez,
            seed: 42,
            deal_schedule: vec![5, 4, 4],
            first_player: PlayerId::new(0),
            allow_step_back: true,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_deal_schedule(mut self, schedule: Vec<usize>) -> Self {
        self.deal_schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    #[must_use]
    pub fn with_step_back(mut self, allow: bool) -> Self {
        self.allow_step_back = allow;
        self
    }

    /// Cards each player receives in deal round `round`.
    #[must_use]
    pub fn cards_for_round(&self, round: usize) -> usize {
        self.deal_schedule[round % self.deal_schedule.len()]
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.deal_schedule.is_empty() {
            return Err(EngineError::Config("deal schedule is empty".into()));
        }
        if let Some(&size) = self
            .deal_schedule
            .iter()
            .find(|&&n| n == 0 || n * PLAYER_COUNT > DECK_SIZE)
        {
            return Err(EngineError::Config(format!(
                "cannot deal {} cards to each of {} players",
                size, PLAYER_COUNT
            )));
        }
        if self.first_player.index() >= PLAYER_COUNT {
            return Err(EngineError::Config(format!(
                "first player {} is not seated",
                self.first_player
            )));
        }
        Ok(())
    }
}
