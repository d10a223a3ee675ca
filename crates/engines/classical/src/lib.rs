//! Classical Checkers Engine
//!
//! Iterative deepening alpha-beta search over the rules engine in
//! `checkers_core`, with a static evaluation and four difficulty tiers.

mod difficulty;
mod eval;
mod ordering;
mod search;
mod ttable;

use checkers_core::{
    legal_moves, position_key, Board, Color, Engine, Move, SearchLimits, SearchResult,
    TimeControl, VariantConfig,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use ordering::HistoryTable;
use search::{Searcher, WIN_BOUND};
use ttable::TTable;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use eval::{evaluate, material, PIECE_VALUES};
pub use search::{SearchOutcome, WIN_SCORE};

/// Slots in the transposition table of a tier that uses one.
const TT_CAPACITY: usize = 1 << 16;

/// Classical checkers engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Iterative deepening up to the tier's depth, inside its time budget
/// - Transposition table and move ordering (hard and expert)
/// - Capture extension at the horizon and repetition detection
/// - Material plus positional evaluation (material only on easy)
///
/// The difficulty is fixed when the engine is built, so a table filled at
/// one tier is never consulted by another.
#[derive(Debug)]
pub struct ClassicalEngine {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    tt: TTable,
    history: HistoryTable,
    /// Node counter for statistics
    nodes: u64,
    /// Searches since the last `new_game`; seeds deliberate mistakes.
    searches: u32,
}

impl ClassicalEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        let capacity = if profile.transposition_table {
            TT_CAPACITY
        } else {
            1
        };
        Self {
            difficulty,
            profile,
            tt: TTable::from_capacity(capacity),
            history: HistoryTable::new(),
            nodes: 0,
            searches: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Iterative deepening search for `to_move`.
    ///
    /// The depth is the smaller of `limits.depth` and the tier's depth; the
    /// clock is the shorter of the limits' time and the tier's budget. When
    /// time runs out or the search is cancelled, the best move of the last
    /// completed depth is returned. `move_count` only seeds the easy and
    /// medium tiers' deliberate mistakes.
    pub fn think(
        &mut self,
        board: &Board,
        to_move: Color,
        move_count: u32,
        config: &VariantConfig,
        limits: SearchLimits,
    ) -> SearchResult {
        self.nodes = 0;
        limits.start();
        let tc = &limits.time_control;
        let max_depth = limits.depth.min(self.profile.depth).max(1);
        let budget = Some(match limits.move_time {
            Some(t) => t.min(self.profile.move_time),
            None => self.profile.move_time,
        });

        let mut best: Option<(Move, i32)> = None;
        let mut completed = 0;
        let mut stopped = false;

        for depth in 1..=max_depth {
            let tt = if self.profile.transposition_table {
                Some(&mut self.tt)
            } else {
                None
            };
            let mut searcher = Searcher::new(config, &self.profile, tt, &mut self.history, tc, budget);
            searcher.interruptible = depth > 1;
            let hint = best.as_ref().map(|(mv, _)| mv.clone());
            let outcome = searcher.search_root(board, to_move, depth, hint.as_ref());
            self.nodes += searcher.nodes;

            if outcome.stopped {
                tracing::debug!(depth, nodes = self.nodes, "search stopped, keeping depth {completed}");
                stopped = true;
                break;
            }
            let Some((mv, score)) = outcome.best_move else {
                break;
            };
            tracing::debug!(
                depth,
                score,
                nodes = self.nodes,
                elapsed = ?tc.elapsed(),
                "iteration complete"
            );
            best = Some((mv, score));
            completed = depth;

            if score.abs() > WIN_BOUND {
                break;
            }
            if tc.is_stopped() {
                stopped = true;
                break;
            }
        }

        if let Some((mv, score)) = best.take() {
            best = Some((self.maybe_blunder(board, to_move, move_count, config, mv), score));
        }

        SearchResult {
            best_move: best.as_ref().map(|(mv, _)| mv.clone()),
            score: best.map(|(_, s)| s).unwrap_or(0),
            depth: completed,
            nodes: self.nodes,
            stopped,
        }
    }

    /// Swaps `best` for a random legal move at the tier's blunder rate.
    ///
    /// The dice are seeded from the position and `move_count`, so the same
    /// call always makes the same choice.
    fn maybe_blunder(
        &self,
        board: &Board,
        to_move: Color,
        move_count: u32,
        config: &VariantConfig,
        best: Move,
    ) -> Move {
        let rate = self.profile.blunder_rate.clamp(0.0, 1.0);
        if rate == 0.0 {
            return best;
        }
        let seed = position_key(board, to_move) ^ (move_count as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = StdRng::seed_from_u64(seed);
        if !rng.gen_bool(rate) {
            return best;
        }
        let moves = legal_moves(board, to_move, config);
        match moves.choose(&mut rng) {
            Some(mv) => {
                tracing::debug!(difficulty = %self.difficulty, %mv, "deliberate inaccuracy");
                mv.clone()
            }
            None => best,
        }
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Engine for ClassicalEngine {
    fn search(
        &mut self,
        board: &Board,
        to_move: Color,
        config: &VariantConfig,
        limits: SearchLimits,
    ) -> SearchResult {
        let count = self.searches;
        self.searches += 1;
        self.think(board, to_move, count, config, limits)
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "Classical (easy)",
            Difficulty::Medium => "Classical (medium)",
            Difficulty::Hard => "Classical (hard)",
            Difficulty::Expert => "Classical (expert)",
        }
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.searches = 0;
        self.tt.clear();
        self.history.clear();
    }
}

/// Best move for `player`, or `None` when it has no legal move.
///
/// Builds a fresh engine for the call, so nothing is shared between calls
/// and the result depends only on the arguments (and the tier's clock).
pub fn get_best_move(
    board: &Board,
    player: Color,
    move_count: u32,
    config: &VariantConfig,
    difficulty: Difficulty,
) -> Option<Move> {
    let profile = difficulty.profile();
    let limits = SearchLimits::depth_and_time(profile.depth, profile.move_time);
    ClassicalEngine::new(difficulty)
        .think(board, player, move_count, config, limits)
        .best_move
}

/// Scores every legal move of `player` at a fixed `depth`, in generator
/// order, from `player`'s point of view. Used for analysis, so there is no
/// clock and no deliberate mistake.
pub fn score_moves(board: &Board, player: Color, config: &VariantConfig, depth: u8) -> Vec<(Move, i32)> {
    let profile = Difficulty::Expert.profile();
    let mut tt = TTable::from_capacity(TT_CAPACITY);
    let mut history = HistoryTable::new();
    let tc = TimeControl::new(None);
    tc.start();
    let mut searcher = Searcher::new(config, &profile, Some(&mut tt), &mut history, &tc, None);
    searcher.interruptible = false;
    searcher.score_root_moves(board, player, depth.max(1))
}
