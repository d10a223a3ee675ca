//! Move ordering: hash move first, then longer captures, promotions and
//! quiet moves by history.

use std::cmp::Reverse;

use checkers_core::{Board, Move, Square, MAX_BOARD_SIZE};

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_SCORE: i32 = 100_000;
const PER_CAPTURE_SCORE: i32 = 1_000;
const PROMOTION_SCORE: i32 = 50_000;

const CELLS: usize = MAX_BOARD_SIZE as usize * MAX_BOARD_SIZE as usize;

/// Counts how often a quiet (from, to) move caused a beta cutoff.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    table: Vec<i32>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            table: vec![0; CELLS * CELLS],
        }
    }

    fn slot(mv: &Move) -> usize {
        Self::cell(mv.from) * CELLS + Self::cell(mv.to)
    }

    fn cell(sq: Square) -> usize {
        sq.index(MAX_BOARD_SIZE)
    }

    pub fn get(&self, mv: &Move) -> i32 {
        self.table[Self::slot(mv)]
    }

    /// Rewards a quiet move that refuted a line searched to `depth`.
    pub fn reward(&mut self, mv: &Move, depth: u8) {
        let bonus = depth as i32 * depth as i32;
        let entry = &mut self.table[Self::slot(mv)];
        *entry = (*entry + bonus).min(PROMOTION_SCORE - 1);
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|v| *v = 0);
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

fn promotes(board: &Board, mv: &Move) -> bool {
    board
        .piece_at(mv.from)
        .is_some_and(|pc| !pc.is_king() && mv.to.row == pc.color.promotion_row(board.size()))
}

/// Ordering score of `mv`; higher is searched first.
pub fn score_move(board: &Board, mv: &Move, tt_move: Option<&Move>, history: &HistoryTable) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }
    let mut score = 0;
    if mv.is_capture() {
        score += CAPTURE_SCORE + PER_CAPTURE_SCORE * mv.capture_count() as i32;
    }
    if promotes(board, mv) {
        score += PROMOTION_SCORE;
    }
    if !mv.is_capture() {
        score += history.get(mv);
    }
    score
}

/// Sorts `moves` best first. Equal scores keep generator order.
pub fn order_moves(board: &Board, moves: &mut [Move], tt_move: Option<&Move>, history: &HistoryTable) {
    moves.sort_by_cached_key(|mv| Reverse(score_move(board, mv, tt_move, history)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
