pub mod board;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod rules;
pub mod time_control;
pub mod types;
pub mod variant;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use movegen::*;
pub use notation::*;
pub use outcome::*;
pub use perft::perft;
pub use rules::*;
pub use time_control::*;
pub use types::*;
pub use variant::*;
pub use zobrist::ZOBRIST;

/// Alias matching the conventional entry-point name.
pub fn create_initial_board(config: &VariantConfig) -> Board {
    Board::initial(config)
}

// =============================================================================
// Engine trait, implemented by every checkers engine (classical, random)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score from the searching side's perspective
    pub score: i32,
    /// Deepest fully completed search depth
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether search was stopped early due to time limit or cancellation
    pub stopped: bool,
}

impl SearchResult {
    pub fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all checkers engines must implement.
///
/// Every call receives the position and rules explicitly; an engine may keep
/// caches between calls but never a hidden "current game".
pub trait Engine: Send {
    /// Search `board` for `to_move` within `limits`.
    fn search(
        &mut self,
        board: &Board,
        to_move: Color,
        config: &VariantConfig,
        limits: SearchLimits,
    ) -> SearchResult;

    /// Returns the engine's name
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ML-checkers"
    }

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}
}
