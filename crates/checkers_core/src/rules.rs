//! Side-level move legality: mandatory and maximum capture.

use crate::board::Board;
use crate::movegen::{capture_moves_into, has_capture, simple_moves_into};
use crate::types::*;
use crate::variant::VariantConfig;

/// Generate every legal move for `player`, returning a freshly allocated vector.
pub fn legal_moves(board: &Board, player: Color, config: &VariantConfig) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    legal_moves_into(board, player, config, &mut out);
    out
}

/// Generate every legal move for `player` into the provided buffer.
///
/// When capture is mandatory and any capture exists, only captures are
/// produced; with `maximum_capture` only the chains removing the most pieces
/// survive. Pieces are visited in row-major order.
pub fn legal_moves_into(board: &Board, player: Color, config: &VariantConfig, out: &mut Vec<Move>) {
    out.clear();
    let pieces: Vec<(Square, Piece)> = board
        .occupied()
        .filter(|(_, pc)| pc.color == player)
        .collect();

    if config.mandatory_capture {
        for &(sq, pc) in &pieces {
            if has_capture(board, sq, pc, config) {
                capture_moves_into(board, sq, pc, config, out);
            }
        }
        if !out.is_empty() {
            if config.maximum_capture {
                let most = out.iter().map(Move::capture_count).max().unwrap_or(0);
                out.retain(|m| m.capture_count() == most);
            }
            return;
        }
        for &(sq, pc) in &pieces {
            simple_moves_into(board, sq, pc, config, out);
        }
        return;
    }

    for &(sq, pc) in &pieces {
        simple_moves_into(board, sq, pc, config, out);
        capture_moves_into(board, sq, pc, config, out);
    }
}

/// True if any of `player`'s pieces can capture.
pub fn player_has_capture(board: &Board, player: Color, config: &VariantConfig) -> bool {
    board
        .occupied()
        .any(|(sq, pc)| pc.color == player && has_capture(board, sq, pc, config))
}

/// Squares of the pieces that must be moved this turn because they can capture.
///
/// Empty when no capture is available (or capture is optional), in which case
/// every piece with a legal move may be selected.
pub fn get_must_capture_positions(board: &Board, player: Color, config: &VariantConfig) -> Vec<Square> {
    if !config.mandatory_capture {
        return Vec::new();
    }
    let mut squares: Vec<Square> = if config.maximum_capture {
        legal_moves(board, player, config)
            .into_iter()
            .filter(Move::is_capture)
            .map(|m| m.from)
            .collect()
    } else {
        board
            .occupied()
            .filter(|&(sq, pc)| pc.color == player && has_capture(board, sq, pc, config))
            .map(|(sq, _)| sq)
            .collect()
    };
    squares.dedup();
    squares
}

/// True if `player` has at least one legal move.
pub fn has_any_move(board: &Board, player: Color, config: &VariantConfig) -> bool {
    if player_has_capture(board, player, config) {
        return true;
    }
    let mut buf = Vec::new();
    board.occupied().filter(|(_, pc)| pc.color == player).any(|(sq, pc)| {
        buf.clear();
        simple_moves_into(board, sq, pc, config, &mut buf);
        !buf.is_empty()
    })
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
