//! Move generation for a single piece.
//!
//! One parameterised algorithm covers every variant; behaviour differs only
//! through the [`VariantConfig`] flags:
//!
//! - Men step one square diagonally forward. They capture forward, and
//!   backward as well when `allow_backward_capture` is set.
//! - Kings step and capture in all four diagonal directions. With
//!   `flying_kings` they slide over any number of empty squares, capture a
//!   piece at any distance and may land on any empty square beyond it.
//!
//! # Capture chains
//!
//! A capture must be continued while the capturing piece can capture again
//! from its landing square. Chains are discovered by a pure recursion where
//! every branch owns a `ChainState`: its own copy of the board with the
//! mover lifted and the branch's captured pieces removed, plus the ordered
//! landings and captures so far. Squares captured earlier in the chain stay
//! blocked until the move completes: they cannot be landed on, passed
//! through, or captured again. Each flying-king landing square is explored
//! as its own move.

use crate::board::Board;
use crate::rules::{legal_moves, player_has_capture};
use crate::types::*;
use crate::variant::VariantConfig;

/// Directions in which `piece` may capture.
fn capture_dirs(piece: Piece, config: &VariantConfig) -> Vec<(i8, i8)> {
    if piece.is_king() || config.allow_backward_capture {
        DIAGONALS.to_vec()
    } else {
        forward_dirs(piece.color).to_vec()
    }
}

fn forward_dirs(color: Color) -> [(i8, i8); 2] {
    let dr = color.forward();
    [(dr, -1), (dr, 1)]
}

/// Moves available to whatever piece stands on `from`, ignoring the
/// player-level mandatory-capture rule: all simple moves plus every complete
/// capture chain.
pub fn piece_moves(board: &Board, from: Square, config: &VariantConfig) -> Vec<Move> {
    let mut out = Vec::new();
    let Some(piece) = board.piece_at(from) else {
        return out;
    };
    simple_moves_into(board, from, piece, config, &mut out);
    capture_moves_into(board, from, piece, config, &mut out);
    out
}

/// Moves the player may make with the piece on `from` this turn.
///
/// Returns nothing for an empty square or an opponent's piece. When capture
/// is mandatory and any of the player's pieces can capture, only capturing
/// moves are returned, so a piece without a capture gets no moves at all.
pub fn get_valid_moves(
    board: &Board,
    from: Square,
    player: Color,
    config: &VariantConfig,
) -> Vec<Move> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    if piece.color != player {
        return Vec::new();
    }
    if !config.mandatory_capture {
        return piece_moves(board, from, config);
    }
    if config.maximum_capture {
        return legal_moves(board, player, config)
            .into_iter()
            .filter(|m| m.from == from)
            .collect();
    }

    let mut captures = Vec::new();
    capture_moves_into(board, from, piece, config, &mut captures);
    if !captures.is_empty() {
        return captures;
    }
    if player_has_capture(board, player, config) {
        return Vec::new();
    }
    let mut out = Vec::new();
    simple_moves_into(board, from, piece, config, &mut out);
    out
}

/// Non-capturing moves of `piece` standing on `from`.
pub(crate) fn simple_moves_into(
    board: &Board,
    from: Square,
    piece: Piece,
    config: &VariantConfig,
    out: &mut Vec<Move>,
) {
    let n = board.size();
    if !piece.is_king() {
        for (dr, dc) in forward_dirs(piece.color) {
            if let Some(to) = from.offset(dr, dc, n) {
                if board.is_empty_at(to) {
                    out.push(Move::step(from, to));
                }
            }
        }
        return;
    }

    for (dr, dc) in DIAGONALS {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc, n) {
            if !board.is_empty_at(to) {
                break;
            }
            out.push(Move::step(from, to));
            if !config.flying_kings {
                break;
            }
            cur = to;
        }
    }
}

/// True if `piece` on `from` has at least one capture available.
pub(crate) fn has_capture(board: &Board, from: Square, piece: Piece, config: &VariantConfig) -> bool {
    !jumps(board, from, &[], piece, config).is_empty()
}

/// Every (captured, landing) pair available to `piece` on `here`.
///
/// `blocked` lists squares vacated by captures earlier in the same chain.
fn jumps(
    board: &Board,
    here: Square,
    blocked: &[Square],
    piece: Piece,
    config: &VariantConfig,
) -> Vec<(Square, Square)> {
    let n = board.size();
    let open = |sq: Square| board.is_empty_at(sq) && !blocked.contains(&sq);
    let flying = piece.is_king() && config.flying_kings;
    let mut found = Vec::new();

    for (dr, dc) in capture_dirs(piece, config) {
        // Walk to the first non-open square; only flying kings may skip gaps.
        let mut cur = here;
        let target = loop {
            match cur.offset(dr, dc, n) {
                Some(next) if flying && open(next) => cur = next,
                Some(next) => break Some(next),
                None => break None,
            }
        };
        let Some(victim) = target else { continue };
        if !matches!(board.piece_at(victim), Some(pc) if pc.color != piece.color) {
            continue;
        }

        let mut land = victim;
        while let Some(next) = land.offset(dr, dc, n) {
            if !open(next) {
                break;
            }
            found.push((victim, next));
            if !flying {
                break;
            }
            land = next;
        }
    }
    found
}

/// Complete capture chains of `piece` starting on `from`.
pub(crate) fn capture_moves_into(
    board: &Board,
    from: Square,
    piece: Piece,
    config: &VariantConfig,
    out: &mut Vec<Move>,
) {
    ChainState::start(board, from).extend(piece, config, out);
}

/// One branch of capture-chain discovery.
#[derive(Clone, Debug)]
struct ChainState {
    /// Board with the mover lifted and this branch's captures removed.
    board: Board,
    /// Current square of the capturing piece.
    at: Square,
    /// Landing squares so far, starting with the origin.
    path: Vec<Square>,
    /// Captured squares so far, in order.
    captures: Vec<Square>,
}

impl ChainState {
    fn start(board: &Board, from: Square) -> Self {
        let mut lifted = board.clone();
        lifted.put(from, None);
        Self {
            board: lifted,
            at: from,
            path: vec![from],
            captures: Vec::new(),
        }
    }

    fn single_captures(&self, piece: Piece, config: &VariantConfig) -> Vec<(Square, Square)> {
        jumps(&self.board, self.at, &self.captures, piece, config)
    }

    fn advance(&self, victim: Square, landing: Square) -> Self {
        let mut next = self.clone();
        next.board.put(victim, None);
        next.captures.push(victim);
        next.path.push(landing);
        next.at = landing;
        next
    }

    /// Recursively extends this branch, emitting every complete chain.
    fn extend(&self, piece: Piece, config: &VariantConfig, out: &mut Vec<Move>) {
        for (victim, landing) in self.single_captures(piece, config) {
            let branch = self.advance(victim, landing);
            let before = out.len();
            branch.extend(piece, config, out);
            if out.len() == before {
                out.push(branch.into_move());
            }
        }
    }

    fn into_move(self) -> Move {
        Move {
            from: self.path[0],
            to: self.at,
            captures: self.captures,
            path: self.path,
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
