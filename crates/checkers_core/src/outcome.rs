//! Game outcome detection and the caller-side game state.

use serde::{Deserialize, Serialize};

use crate::board::{make_move, position_key, Board};
use crate::error::EngineError;
use crate::rules::{has_any_move, legal_moves};
use crate::types::*;
use crate::variant::VariantConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Red,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(c: Color) -> Self {
        match c {
            Color::Red => Winner::Red,
            Color::Black => Winner::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// The same position with the same side to move occurred `repetition_limit` times.
    Repetition,
    /// Too many consecutive king moves without a capture or a man move.
    NoProgress,
    /// The game hit its overall move cap.
    MoveLimit,
}

/// Draw thresholds. These are policy, not rules of the variant: callers may
/// tune them freely. A value of zero disables the corresponding rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawPolicy {
    pub repetition_limit: u32,
    /// Consecutive plies of king moves without capture.
    pub quiet_move_limit: u32,
    /// Total plies after which the game is drawn.
    pub max_moves: Option<u32>,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            repetition_limit: 3,
            quiet_move_limit: 50,
            max_moves: None,
        }
    }
}

/// Decides the game from the board alone.
///
/// A side with no pieces loses. Otherwise a side without a legal move loses;
/// if both sides are blocked the game is drawn. While both sides keep a piece
/// with a legal move there is no winner.
pub fn check_winner(board: &Board, config: &VariantConfig) -> Option<Winner> {
    let red = board.count(Color::Red);
    let black = board.count(Color::Black);
    match (red, black) {
        (0, 0) => return Some(Winner::Draw),
        (0, _) => return Some(Winner::Black),
        (_, 0) => return Some(Winner::Red),
        _ => {}
    }
    let red_moves = has_any_move(board, Color::Red, config);
    let black_moves = has_any_move(board, Color::Black, config);
    match (red_moves, black_moves) {
        (true, true) => None,
        (false, true) => Some(Winner::Black),
        (true, false) => Some(Winner::Red),
        (false, false) => Some(Winner::Draw),
    }
}

/// Decides the game for the side about to move: it loses with no pieces or
/// no legal moves.
pub fn check_winner_to_move(board: &Board, to_move: Color, config: &VariantConfig) -> Option<Winner> {
    if board.count(to_move) == 0 || !has_any_move(board, to_move, config) {
        return Some(to_move.other().into());
    }
    None
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Color),
    Draw(DrawReason),
}

impl Outcome {
    pub fn winner(self) -> Winner {
        match self {
            Outcome::Win(c) => c.into(),
            Outcome::Draw(_) => Winner::Draw,
        }
    }
}

/// A game in progress, assembled by callers around the pure rule functions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub to_move: Color,
    /// Plies played so far.
    pub move_count: u32,
    pub history: Vec<Move>,
    /// Position keys after every ply, the initial position first.
    pub positions: Vec<u64>,
    /// Consecutive plies of king moves without capture.
    pub quiet_moves: u32,
    pub outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(config: &VariantConfig) -> Self {
        Self::from_position(Board::initial(config), config.first_to_move, config)
    }

    pub fn from_position(board: Board, to_move: Color, config: &VariantConfig) -> Self {
        let positions = vec![position_key(&board, to_move)];
        let mut state = Self {
            board,
            to_move,
            move_count: 0,
            history: Vec::new(),
            positions,
            quiet_moves: 0,
            outcome: None,
        };
        state.outcome = state.evaluate_outcome(config);
        state
    }

    pub fn legal_moves(&self, config: &VariantConfig) -> Vec<Move> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        legal_moves(&self.board, self.to_move, config)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.outcome.map(Outcome::winner)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Plays `mv` for the side to move after checking it is legal.
    pub fn play(&mut self, mv: &Move, config: &VariantConfig) -> Result<(), EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::GameOver);
        }
        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or(EngineError::EmptySquare(mv.from))?;
        if piece.color != self.to_move {
            return Err(EngineError::WrongColor {
                square: mv.from,
                expected: self.to_move,
                found: piece.color,
            });
        }
        if !legal_moves(&self.board, self.to_move, config).contains(mv) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }

        self.board = make_move(&self.board, mv, config)?;
        self.quiet_moves = if piece.is_king() && !mv.is_capture() {
            self.quiet_moves + 1
        } else {
            0
        };
        self.to_move = self.to_move.other();
        self.move_count += 1;
        self.history.push(mv.clone());
        self.positions.push(position_key(&self.board, self.to_move));
        self.outcome = self.evaluate_outcome(config);
        if let Some(outcome) = self.outcome {
            tracing::debug!(?outcome, plies = self.move_count, "game finished");
        }
        Ok(())
    }

    /// Number of times the current position has occurred.
    pub fn repetitions(&self) -> usize {
        match self.positions.last() {
            Some(&key) => self.positions.iter().filter(|&&k| k == key).count(),
            None => 0,
        }
    }

    fn evaluate_outcome(&self, config: &VariantConfig) -> Option<Outcome> {
        let mover = self.to_move;
        if self.board.count(mover) == 0 {
            return Some(Outcome::Win(mover.other()));
        }
        if !has_any_move(&self.board, mover, config) {
            return Some(Outcome::Win(mover.other()));
        }

        let policy = &config.draw;
        if policy.repetition_limit > 0 && self.repetitions() >= policy.repetition_limit as usize {
            return Some(Outcome::Draw(DrawReason::Repetition));
        }
        if policy.quiet_move_limit > 0 && self.quiet_moves >= policy.quiet_move_limit {
            return Some(Outcome::Draw(DrawReason::NoProgress));
        }
        if let Some(max) = policy.max_moves {
            if self.move_count >= max {
                return Some(Outcome::Draw(DrawReason::MoveLimit));
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
