//! Builder for a ready-to-play game.

use super::{Game, GameState};
use crate::core::{EngineError, GameConfig, PlayerId, Table, Variant};
use crate::rules::{CardTable, Rules};

/// Builder for creating a [`Game`] and its opening state.
///
/// ```
/// use keez_engine::game::KeezGameBuilder;
/// use keez_engine::core::Variant;
///
/// let (game, state) = KeezGameBuilder::new()
///     .variant(Variant::KeezSimple)
///     .seed(3)
///     .build()
///     .unwrap();
/// assert_eq!(game.rules().action_space().len(), 59);
/// assert_eq!(state.cards.stock().len(), 32);
/// ```
#[derive(Default)]
pub struct KeezGameBuilder {
    config: GameConfig,
    table: Option<Table>,
    card_table: Option<CardTable>,
}

impl KeezGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn deal_schedule(mut self, schedule: Vec<usize>) -> Self {
        self.config.deal_schedule = schedule;
        self
    }

    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.config.first_player = player;
        self
    }

    pub fn step_back(mut self, allow: bool) -> Self {
        self.config.allow_step_back = allow;
        self
    }

    /// Custom seating; blocks on the board follow it.
    pub fn table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    /// Custom card table; overrides the variant's.
    pub fn card_table(mut self, card_table: CardTable) -> Self {
        self.card_table = Some(card_table);
        self
    }

    /// Build the game and deal the first round.
    pub fn build(self) -> Result<(Game, GameState), EngineError> {
        self.config.validate()?;
        let rules = match self.card_table {
            Some(card_table) => Rules::with_table(card_table),
            None => Rules::new(self.config.variant),
        };
        let table = self.table.unwrap_or_default();

        let mut game = Game::with_rules(self.config, table, rules);
        let (state, _) = game.init_game()?;
        Ok((game, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardValue;
    use crate::core::Color;
    use crate::ops::CardOp;
    use smallvec::smallvec;

    #[test]
    fn test_builder_defaults() {
        let (game, state) = KeezGameBuilder::new().build().unwrap();
        assert_eq!(game.rules().action_space().len(), 271);
        assert_eq!(state.move_player, PlayerId::new(0));
    }

    #[test]
    fn test_builder_first_player() {
        let (_, state) = KeezGameBuilder::new()
            .first_player(PlayerId::new(3))
            .build()
            .unwrap();
        assert_eq!(state.move_player, PlayerId::new(3));
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let result = KeezGameBuilder::new().deal_schedule(vec![]).build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_builder_custom_seating() {
        let table = Table::new([
            ("Ann", Color::Red),
            ("Bo", Color::Green),
            ("Cy", Color::Yellow),
            ("Di", Color::Blue),
        ]);
        let (game, _) = KeezGameBuilder::new().table(table).build().unwrap();
        assert_eq!(game.board().start_field(Color::Red).0, 5);
        assert_eq!(game.board().start_field(Color::Green).0, 29);
    }

    #[test]
    fn test_builder_custom_card_table() {
        let mut card_table = Rules::card_table(Variant::Keez);
        card_table[usize::from(CardValue::Queen.value()) - 1] = smallvec![CardOp::Switch];
        let (game, _) = KeezGameBuilder::new().card_table(card_table).build().unwrap();
        assert_eq!(game.rules().ops_for(CardValue::Queen), &[CardOp::Switch]);
        assert!(game.rules().action_space().contains("SW12P0A0"));
    }
}
