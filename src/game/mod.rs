//! The turn state machine.
//!
//! ## Flow
//!
//! `init_game` shuffles, deals the first round and hands the turn to the
//! configured first player. Each `step` applies one allowed move (or a pass
//! when nothing is allowed), advances the turn to the next seat and returns
//! the new state with the reward vector. When every hand is empty the player
//! to act deals the next round.
//!
//! ## Undo
//!
//! `Game` keeps the state preceding every step on a stack; `step_back` pops
//! it. States share their persistent card piles and log, so the stack stays
//! small.

mod builder;
mod state;

pub use builder::KeezGameBuilder;
pub use state::{GameState, MoveRecord, PlayerView};

use serde::{Deserialize, Serialize};

use crate::board::{Board, FieldId, BLOCK_SIZE, MARBLES_PER_COLOR};
use crate::core::{
    Color, EngineError, GameConfig, PlayerId, PlayerMap, Table, TeamId, PLAYER_COUNT,
};
use crate::moves::{encoding, Move, MoveType, PASS_ACTION};
use crate::ops::OpContext;
use crate::rules::Rules;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub team: TeamId,
    pub winners: [PlayerId; 2],
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }
}

/// What the game is waiting for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Every hand is empty; the player deals the next round.
    Dealing(PlayerId),
    /// The player chooses a move, or passes if none is allowed.
    AwaitingMove(PlayerId),
    GameOver(GameResult),
}

/// Output of a successful `step`.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub state: GameState,
    /// 1 for each winner once the game is over, 0 otherwise.
    pub rewards: PlayerMap<f32>,
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    table: Table,
    board: Board,
    rules: Rules,
    history: Vec<GameState>,
    /// Games dealt so far; mixed into the configured seed.
    games_started: u64,
}

impl Game {
    /// A game with the standard seating.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_table(config, Table::standard())
    }

    pub fn with_table(config: GameConfig, table: Table) -> Result<Self, EngineError> {
        config.validate()?;
        let rules = Rules::new(config.variant);
        Ok(Self::with_rules(config, table, rules))
    }

    /// A game with a custom rule set; the configured variant is ignored.
    pub(crate) fn with_rules(config: GameConfig, table: Table, rules: Rules) -> Self {
        let board = Board::new(&table);
        Self {
            config,
            table,
            board,
            rules,
            history: Vec::new(),
            games_started: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Number of states on the undo stack.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // === Lifecycle ===

    /// Fresh state with the first round dealt. Clears the undo stack.
    ///
    /// Every call shuffles a new deck. The first game uses the configured
    /// seed as is, so a fresh `Game` always replays the same sequence.
    pub fn init_game(&mut self) -> Result<(GameState, PlayerId), EngineError> {
        self.history.clear();
        let seed = self.next_game_seed();
        let mut state = GameState::new(&self.rules.deck(), seed, self.config.first_player);
        self.deal_round(&mut state)?;
        let first = state.move_player;
        Ok((state, first))
    }

    fn next_game_seed(&mut self) -> u64 {
        let seed = self.config.seed ^ self.games_started.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.games_started += 1;
        seed
    }

    fn deal_round(&self, state: &mut GameState) -> Result<(), EngineError> {
        let per_player = self.config.cards_for_round(state.deal_round);
        if state.cards.stock().len() < per_player * PLAYER_COUNT {
            state.with_rng(|rng, cards| cards.reset(rng));
        }
        for _ in 0..per_player {
            for player in PlayerId::all(PLAYER_COUNT) {
                state.cards.deal_card(player)?;
            }
        }
        state.deal_round += 1;
        Ok(())
    }

    /// Own color, or the team mate's once the own marbles are all home.
    #[must_use]
    pub fn play_color(&self, player: PlayerId, state: &GameState) -> Color {
        let own = self.table.player(player).color;
        if self.board.is_color_finished(own, &state.board) {
            self.table.partner_color(own)
        } else {
            own
        }
    }

    /// Moves the player to act may make. Empty means the player must pass.
    #[must_use]
    pub fn get_allowed_moves(&self, state: &GameState) -> Vec<Move> {
        if self.result(state).is_some() {
            return Vec::new();
        }

        let player = state.move_player;
        let hand = state.cards.hand(player);
        if hand.is_empty() {
            return if state.cards.all_hands_empty() {
                vec![Move::deal(player)]
            } else {
                Vec::new()
            };
        }

        let color = self.play_color(player, state);
        let ctx = OpContext::new(&self.board, &self.table);
        let moves: Vec<Move> = hand
            .iter()
            .flat_map(|&card| {
                self.rules
                    .ops_for(card.value)
                    .iter()
                    .flat_map(move |op| op.get_moves(&ctx, player, color, card, &state.board))
            })
            .collect();

        if moves.is_empty() {
            vec![Move::throw_cards(player, hand.iter().copied())]
        } else {
            moves
        }
    }

    /// Apply `mv`, or pass with `None`. The input state is never modified;
    /// a rejected step leaves the undo stack untouched.
    pub fn step(&mut self, mv: Option<&Move>, state: &GameState) -> Result<StepOutcome, EngineError> {
        if self.result(state).is_some() {
            return Err(EngineError::GameOver);
        }

        let player = state.move_player;
        let allowed = self.get_allowed_moves(state);
        let raw = match mv {
            None if !allowed.is_empty() => {
                return Err(EngineError::PassNotAllowed {
                    player,
                    legal: allowed.len(),
                });
            }
            None => PASS_ACTION.to_string(),
            Some(mv) => {
                let raw = encoding::raw_action(mv, &self.board, &self.table, &state.board);
                if !allowed.contains(mv) {
                    return Err(EngineError::InvalidMove {
                        player: mv.player,
                        raw,
                    });
                }
                raw
            }
        };

        let mut next = state.clone();
        if let Some(mv) = mv {
            self.apply(&mut next, mv)?;
        }
        next.record(MoveRecord {
            move_number: state.move_number,
            player,
            kind: mv.map(|m| m.kind),
            raw,
            cards: mv.map(|m| m.cards.clone()).unwrap_or_default(),
            hits: mv.map_or(0, Move::hit_count),
        });
        next.move_number += 1;
        next.move_player = player.next();

        if self.config.allow_step_back {
            self.history.push(state.clone());
        }

        let (done, rewards) = self.is_over(&next);
        Ok(StepOutcome {
            state: next,
            rewards,
            done,
        })
    }

    fn apply(&self, state: &mut GameState, mv: &Move) -> Result<(), EngineError> {
        match mv.kind {
            MoveType::Deal => self.deal_round(state),
            MoveType::ThrowCards => state.cards.play_cards(mv.player, &mv.cards),
            MoveType::Start | MoveType::Run | MoveType::Split | MoveType::Switch => {
                mv.apply(&mut state.board);
                state.cards.play_cards(mv.player, &mv.cards)
            }
        }
    }

    /// Pop the state preceding the last step.
    pub fn step_back(&mut self) -> Option<GameState> {
        self.history.pop()
    }

    // === Outcome ===

    /// The winning team, once both its colors are home.
    #[must_use]
    pub fn result(&self, state: &GameState) -> Option<GameResult> {
        self.table.teams().iter().find_map(|team| {
            let finished = team.members.iter().all(|&member| {
                let color = self.table.player(member).color;
                self.board.is_color_finished(color, &state.board)
            });
            finished.then(|| GameResult {
                team: team.id,
                winners: team.members,
            })
        })
    }

    /// Whether the game is over, with 1 for each winner and 0 for everyone else.
    #[must_use]
    pub fn is_over(&self, state: &GameState) -> (bool, PlayerMap<f32>) {
        match self.result(state) {
            Some(result) => (
                true,
                PlayerMap::new(PLAYER_COUNT, |p| if result.is_winner(p) { 1.0 } else { 0.0 }),
            ),
            None => (false, PlayerMap::with_value(PLAYER_COUNT, 0.0)),
        }
    }

    #[must_use]
    pub fn phase(&self, state: &GameState) -> Phase {
        if let Some(result) = self.result(state) {
            return Phase::GameOver(result);
        }
        if state.cards.all_hands_empty() {
            Phase::Dealing(state.move_player)
        } else {
            Phase::AwaitingMove(state.move_player)
        }
    }

    // === Render ===

    /// Textual dump: turn, hands, piles and one line per color block.
    #[must_use]
    pub fn render(&self, state: &GameState) -> String {
        let mut out = format!(
            "Move {} | {} ({}) to play | stock {} | discard {}\n",
            state.move_number,
            state.move_player,
            self.play_color(state.move_player, state),
            state.cards.stock().len(),
            state.cards.discard().len(),
        );

        for player in self.table.players() {
            let hand: Vec<String> = state
                .cards
                .hand(player.id)
                .iter()
                .map(ToString::to_string)
                .collect();
            out.push_str(&format!("{:<8} [{}]\n", player.name, hand.join(", ")));
        }

        let cell = |field: usize| {
            state
                .board
                .marble_on(FieldId(field as u8))
                .map_or('.', |m| self.board.marble(m).color.letter())
        };
        for (block, color) in self.board.colors().iter().enumerate() {
            let base = block * BLOCK_SIZE;
            let wait_start = base + BLOCK_SIZE - MARBLES_PER_COLOR;
            let home: String = (base..base + MARBLES_PER_COLOR).rev().map(cell).collect();
            let track: String = (base + MARBLES_PER_COLOR..wait_start).map(cell).collect();
            let wait: String = (wait_start..base + BLOCK_SIZE).map(cell).collect();
            out.push_str(&format!("{:<8} wait {} | track {} | home {}\n", color, wait, track, home));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MarbleId;
    use crate::cards::{Card, CardValue, Suit};

    fn new_game() -> (Game, GameState) {
        let mut game = Game::new(GameConfig::default()).unwrap();
        let (state, _) = game.init_game().unwrap();
        (game, state)
    }

    #[test]
    fn test_init_game_deals_five() {
        let (game, state) = new_game();
        assert_eq!(state.cards.stock().len(), 32);
        for player in PlayerId::all(PLAYER_COUNT) {
            assert_eq!(state.cards.hand(player).len(), 5);
        }
        assert_eq!(state.move_player, game.config().first_player);
        assert_eq!(state.deal_round, 1);
    }

    #[test]
    fn test_reinit_shuffles_new_deck() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        let (first, _) = game.init_game().unwrap();
        let (second, _) = game.init_game().unwrap();
        assert_ne!(first.cards, second.cards);
        assert_eq!(first.rng_state().seed, game.config().seed);

        // A fresh game with the same seed replays both deals
        let mut replay = Game::new(GameConfig::default()).unwrap();
        assert_eq!(replay.init_game().unwrap().0, first);
        assert_eq!(replay.init_game().unwrap().0, second);
    }

    #[test]
    fn test_play_color_switches_to_partner() {
        let (game, mut state) = new_game();
        let green = PlayerId::new(0);
        assert_eq!(game.play_color(green, &state), Color::Green);

        for (i, field) in [0u8, 1, 2, 3].into_iter().enumerate() {
            state.board.place_marble(MarbleId(i as u8), FieldId(field));
        }
        assert_eq!(game.play_color(green, &state), Color::Blue);
    }

    #[test]
    fn test_state_for_player() {
        let (game, mut state) = new_game();
        let green = PlayerId::new(0);
        let view = state.state_for_player(&game, green);
        assert_eq!(view.player, green);
        assert_eq!(view.cards, state.cards.state_array(green));
        assert_eq!(view.cards[56], 0);
        assert_eq!(view.cards[57], 32);
        assert_eq!(view.fields_with_marbles.len(), 16);
        assert_eq!(view.fields_with_marbles[0], (FieldId(20), MarbleId(0)));
        assert_eq!(view.play_colors.values().copied().collect::<Vec<_>>(), game.table().colors());

        for (i, field) in [0u8, 1, 2, 3].into_iter().enumerate() {
            state.board.place_marble(MarbleId(i as u8), FieldId(field));
        }
        let view = state.state_for_player(&game, PlayerId::new(1));
        assert_eq!(view.fields_with_marbles[0], (FieldId(0), MarbleId(0)));
        assert_eq!(view.play_colors[green], Color::Blue);
        assert_eq!(view.play_colors[PlayerId::new(1)], Color::Red);
    }

    #[test]
    fn test_result_requires_both_team_colors() {
        let (game, mut state) = new_game();
        for (i, field) in [0u8, 1, 2, 3].into_iter().enumerate() {
            state.board.place_marble(MarbleId(i as u8), FieldId(field));
        }
        assert!(game.result(&state).is_none());

        for (i, field) in [48u8, 49, 50, 51].into_iter().enumerate() {
            state.board.place_marble(MarbleId(8 + i as u8), FieldId(field));
        }
        let result = game.result(&state).unwrap();
        assert!(result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(2)));
        assert!(!result.is_winner(PlayerId::new(1)));

        let (done, rewards) = game.is_over(&state);
        assert!(done);
        assert_eq!(rewards.values().sum::<f32>(), 2.0);
        assert_eq!(game.phase(&state), Phase::GameOver(result));
    }

    #[test]
    fn test_throw_cards_when_nothing_moves() {
        let (game, state) = new_game();
        // All marbles wait: only Aces and Kings can move.
        let hand = state.cards.hand(state.move_player);
        let can_start = hand
            .iter()
            .any(|c| matches!(c.value, CardValue::Ace | CardValue::King));
        let moves = game.get_allowed_moves(&state);
        if can_start {
            assert!(moves.iter().all(|m| m.kind == MoveType::Start));
        } else {
            assert_eq!(moves.len(), 1);
            assert_eq!(moves[0].kind, MoveType::ThrowCards);
            assert_eq!(moves[0].cards.len(), 5);
        }
    }

    #[test]
    fn test_render_mentions_every_color() {
        let (game, state) = new_game();
        let text = game.render(&state);
        for color in Color::ALL {
            assert!(text.contains(&color.to_string()));
        }
        assert!(text.contains("wait GGGG"));
    }

    #[test]
    fn test_step_rejects_foreign_move() {
        let (mut game, state) = new_game();
        let card = Card::new(Suit::Spades, CardValue::King);
        let bogus = Move::throw_cards(state.move_player, [card, card]);

        let err = game.step(Some(&bogus), &state).unwrap_err();
        assert!(matches!(err, EngineError::InvalidMove { .. }));
        assert_eq!(game.history_len(), 0);
    }
}
