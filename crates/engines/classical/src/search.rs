//! Negamax search with alpha-beta pruning

use std::time::Duration;

use checkers_core::{legal_moves, make_move, position_key, Board, Color, Move, TimeControl, VariantConfig};

use crate::difficulty::DifficultyProfile;
use crate::eval::evaluate;
use crate::ordering::{order_moves, HistoryTable};
use crate::ttable::{TTable, TTableEntry};

/// Score of a won position, less the plies needed to reach it.
pub const WIN_SCORE: i32 = 100_000;

/// Scores beyond this encode a forced win or loss.
pub(crate) const WIN_BOUND: i32 = WIN_SCORE - 1_000;

const INFINITY: i32 = WIN_SCORE + 1;

/// Horizon plies a single line may be extended while captures are pending.
const MAX_CAPTURE_EXTENSION: u8 = 16;

/// Result from a root search indicating whether it completed or was stopped.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best move and its score, if any legal move exists
    pub best_move: Option<(Move, i32)>,
    /// True if the search was stopped before finishing
    pub stopped: bool,
}

/// One search pass over a fixed position.
pub(crate) struct Searcher<'a> {
    config: &'a VariantConfig,
    profile: &'a DifficultyProfile,
    tt: Option<&'a mut TTable>,
    history: &'a mut HistoryTable,
    tc: &'a TimeControl,
    /// Wall-clock budget on top of the time control's own limit.
    budget: Option<Duration>,
    /// Position keys from the root down to the current node.
    line: Vec<u64>,
    pub nodes: u64,
    /// Depth 1 runs to completion regardless of the clock.
    pub interruptible: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(
        config: &'a VariantConfig,
        profile: &'a DifficultyProfile,
        tt: Option<&'a mut TTable>,
        history: &'a mut HistoryTable,
        tc: &'a TimeControl,
        budget: Option<Duration>,
    ) -> Self {
        Self {
            config,
            profile,
            tt,
            history,
            tc,
            budget,
            line: Vec::with_capacity(64),
            nodes: 0,
            interruptible: true,
        }
    }

    fn should_stop(&self) -> bool {
        if !self.interruptible {
            return false;
        }
        if self.tc.is_stopped() {
            return true;
        }
        if !self.tc.should_check_time(self.nodes) {
            return false;
        }
        self.tc.check_budget(self.budget)
    }

    /// Searches every root move to `depth` and returns the best one.
    ///
    /// `hint` (usually the previous iteration's best move) is tried first.
    /// Among equal scores the first move in search order wins.
    pub fn search_root(
        &mut self,
        board: &Board,
        to_move: Color,
        depth: u8,
        hint: Option<&Move>,
    ) -> SearchOutcome {
        let mut moves = legal_moves(board, to_move, self.config);
        if moves.is_empty() {
            return SearchOutcome {
                best_move: None,
                stopped: false,
            };
        }
        if self.profile.move_ordering {
            order_moves(board, &mut moves, hint, self.history);
        }

        self.line.clear();
        self.line.push(position_key(board, to_move));

        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let Ok(next) = make_move(board, &mv, self.config) else {
                continue;
            };
            self.line.push(position_key(&next, to_move.other()));
            let (score, stopped) = self.negamax(
                &next,
                to_move.other(),
                depth.saturating_sub(1),
                1,
                -INFINITY,
                -alpha,
                0,
            );
            self.line.pop();

            if stopped {
                return SearchOutcome {
                    best_move: best,
                    stopped: true,
                };
            }

            let score = -score;
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        SearchOutcome {
            best_move: best,
            stopped: false,
        }
    }

    /// Exact score of every root move at `depth`, in generator order.
    pub fn score_root_moves(&mut self, board: &Board, to_move: Color, depth: u8) -> Vec<(Move, i32)> {
        let moves = legal_moves(board, to_move, self.config);
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let Ok(next) = make_move(board, &mv, self.config) else {
                continue;
            };
            self.line.clear();
            self.line.push(position_key(board, to_move));
            self.line.push(position_key(&next, to_move.other()));
            let (score, _) = self.negamax(
                &next,
                to_move.other(),
                depth.saturating_sub(1),
                1,
                -INFINITY,
                INFINITY,
                0,
            );
            scored.push((mv, -score));
        }
        scored
    }

    /// Recursive negamax search with alpha-beta pruning.
    ///
    /// Returns (score, stopped) where stopped indicates the search was aborted.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &Board,
        to_move: Color,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        beta: i32,
        extended: u8,
    ) -> (i32, bool) {
        self.nodes += 1;
        if self.should_stop() {
            return (0, true);
        }

        // A position already on the current line is a draw by repetition.
        let key = position_key(board, to_move);
        let earlier = &self.line[..self.line.len().saturating_sub(1)];
        if earlier.contains(&key) {
            return (0, false);
        }

        let mut moves = legal_moves(board, to_move, self.config);
        if moves.is_empty() {
            return (-(WIN_SCORE - ply), false);
        }

        let mut depth = depth;
        let mut extended = extended;
        if depth == 0 {
            let capture_pending = self.config.mandatory_capture && moves[0].is_capture();
            if !capture_pending || extended >= MAX_CAPTURE_EXTENSION {
                return (evaluate(board, to_move, self.profile.positional_eval), false);
            }
            depth = 1;
            extended += 1;
        }

        let original_alpha = alpha;
        let mut tt_move = None;
        if let Some(tt) = self.tt.as_deref_mut() {
            if let Some(entry) = tt.get(key) {
                if entry.depth >= depth {
                    if let Some(score) = entry.try_score(alpha, beta, ply) {
                        return (score, false);
                    }
                }
                tt_move = entry.best_move.clone();
            }
        }

        if self.profile.move_ordering {
            order_moves(board, &mut moves, tt_move.as_ref(), self.history);
        }

        let mut best = -INFINITY;
        let mut best_move = None;
        for mv in &moves {
            let Ok(next) = make_move(board, mv, self.config) else {
                continue;
            };
            self.line.push(position_key(&next, to_move.other()));
            let (score, stopped) = self.negamax(
                &next,
                to_move.other(),
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                extended,
            );
            self.line.pop();

            if stopped {
                return (best, true);
            }

            let score = -score;
            if score > best {
                best = score;
                best_move = Some(mv.clone());
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                if !mv.is_capture() && self.profile.move_ordering {
                    self.history.reward(mv, depth);
                }
                break; // Beta cutoff
            }
        }

        if let Some(tt) = self.tt.as_deref_mut() {
            tt.store(TTableEntry::new(key, best_move, best, original_alpha, beta, depth, ply));
        }
        (best, false)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
