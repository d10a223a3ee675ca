//! Match runner for playing games between engines

use checkers_core::{Board, Color, Engine, EngineError, GameState, SearchLimits, VariantConfig, Winner};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::record::GameRecord;

/// Result of a single game from one engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Result for the engine that played `color` in a game won by `winner`.
    pub fn for_color(winner: Winner, color: Color) -> Self {
        match winner {
            Winner::Draw => GameResult::Draw,
            w if w == Winner::from(color) => GameResult::Win,
            _ => GameResult::Loss,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub variant: VariantConfig,
    /// Number of games to play
    pub num_games: u32,
    /// Search depth for engines
    pub depth: u8,
    /// Maximum time per move (None = no limit)
    pub time_per_move: Option<Duration>,
    /// Plies before a game is drawn, unless the variant sets its own cap
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            variant: VariantConfig::default(),
            num_games: 10,
            depth: 6,
            time_per_move: None,
            max_moves: 200,
            alternate_colors: true,
        }
    }
}

impl MatchConfig {
    /// Create search limits based on this config
    fn search_limits(&self) -> SearchLimits {
        match self.time_per_move {
            Some(time) => SearchLimits::depth_and_time(self.depth, time),
            None => SearchLimits::depth(self.depth),
        }
    }

    /// The variant with a move cap filled in so every game terminates.
    fn rules(&self) -> VariantConfig {
        let mut rules = self.variant.clone();
        if rules.draw.max_moves.is_none() {
            rules.draw.max_moves = Some(self.max_moves);
        }
        rules
    }
}

/// Everything a match produced.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Tally from engine1's perspective
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines.
    ///
    /// Engine1 moves first in even games (and in every game when colours do
    /// not alternate). Fails if an engine plays an illegal move.
    pub fn run_match(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> Result<MatchOutcome, EngineError> {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);
        let first = self.config.variant.first_to_move;

        for game_num in 0..self.config.num_games {
            let engine1_first = !self.config.alternate_colors || game_num % 2 == 0;

            let record = if engine1_first {
                self.play_game(engine1, engine2)?
            } else {
                self.play_game(engine2, engine1)?
            };
            let engine1_color = if engine1_first { first } else { first.other() };
            let game_result = GameResult::for_color(record.result.unwrap_or(Winner::Draw), engine1_color);
            result.add(game_result);

            tracing::info!(
                game = game_num + 1,
                of = self.config.num_games,
                engine1 = %engine1.name(),
                color = %engine1_color,
                result = ?game_result,
                plies = record.moves.len(),
                "W-L-D {}-{}-{}",
                result.wins,
                result.losses,
                result.draws
            );
            games.push(record);
        }

        Ok(MatchOutcome { result, games })
    }

    /// Play a single game from the initial position; `first` moves first.
    pub fn play_game(
        &self,
        first: &mut dyn Engine,
        second: &mut dyn Engine,
    ) -> Result<GameRecord, EngineError> {
        let rules = self.config.rules();
        let initial = Board::initial(&rules);
        let first_color = rules.first_to_move;
        let mut state = GameState::from_position(initial.clone(), first_color, &rules);
        first.new_game();
        second.new_game();

        while !state.is_over() {
            // Create fresh search limits for each move (resets the clock)
            let limits = self.config.search_limits();

            let result = if state.to_move == first_color {
                first.search(&state.board, state.to_move, &rules, limits)
            } else {
                second.search(&state.board, state.to_move, &rules, limits)
            };

            match result.best_move {
                Some(mv) => state.play(&mv, &rules)?,
                // An undecided game always has a move; an engine that finds
                // none resigns.
                None => {
                    tracing::warn!(color = %state.to_move, "engine returned no move, resigning");
                    break;
                }
            }
        }

        let mut record = GameRecord::from_game(&rules, initial, first_color, &state);
        if record.result.is_none() {
            record.result = Some(state.to_move.other().into());
        }
        let (red, black) = if first_color == Color::Red {
            (first.name().to_string(), second.name().to_string())
        } else {
            (second.name().to_string(), first.name().to_string())
        };
        Ok(record.with_players(&red, &black))
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> Result<MatchResult, EngineError> {
    let config = MatchConfig {
        num_games,
        depth,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    Ok(runner.run_match(engine1, engine2)?.result)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
