//! Random Move Checkers Engine
//!
//! A simple engine that selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Baseline comparisons (any real engine should easily beat this)
//! - Stress testing move generation with long random games

use checkers_core::{legal_moves_into, Board, Color, Engine, SearchLimits, SearchResult, VariantConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A checkers engine that plays random legal moves.
///
/// The generator is seeded, so two engines built with the same seed play
/// the same moves when shown the same positions.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    seed: u64,
    nodes: u64,
}

impl RandomEngine {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            nodes: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(
        &mut self,
        board: &Board,
        to_move: Color,
        config: &VariantConfig,
        _limits: SearchLimits,
    ) -> SearchResult {
        let mut moves = Vec::with_capacity(32);
        legal_moves_into(board, to_move, config, &mut moves);

        self.nodes = 1;

        let best_move = moves.choose(&mut self.rng).cloned();

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    /// Restarts the move sequence from the original seed.
    fn new_game(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.nodes = 0;
    }
}
