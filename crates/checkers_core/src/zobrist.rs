//! Zobrist hashing for checkers boards.
//!
//! Boards are immutable values, so a board's key is recomputed from its
//! occupied squares. The keys feed repetition detection and the search
//! engine's transposition table.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece on each square (2 colors × 2 ranks × 256 squares)
//! - Side to move (1 value)

use crate::types::{Color, Piece};
use crate::variant::MAX_BOARD_SIZE;

const MAX_SQUARES: usize = MAX_BOARD_SIZE as usize * MAX_BOARD_SIZE as usize;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][rank][square index on a MAX_BOARD_SIZE grid]
    pub pieces: [[[u64; MAX_SQUARES]; 2]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub side_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using xorshift64 with a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x2545F4914F6CDD1Du64;

        let mut pieces = [[[0u64; MAX_SQUARES]; 2]; 2];
        let mut color = 0;
        while color < 2 {
            let mut rank = 0;
            while rank < 2 {
                let mut sq = 0;
                while sq < MAX_SQUARES {
                    state = xorshift64(state);
                    pieces[color][rank][sq] = state;
                    sq += 1;
                }
                rank += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        ZobristKeys {
            pieces,
            side_to_move,
        }
    }

    /// Key for a piece on a (row, col), independent of the board size.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, row: u8, col: u8) -> u64 {
        let idx = row as usize * MAX_BOARD_SIZE as usize + col as usize;
        self.pieces[piece.color.idx()][piece.rank.idx()][idx]
    }

    #[inline(always)]
    pub fn side_key(&self, to_move: Color) -> u64 {
        match to_move {
            Color::Red => 0,
            Color::Black => self.side_to_move,
        }
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
