//! Static evaluation of checkers positions.

use checkers_core::{Board, Color, Rank, Square};

/// Material values, indexed by Rank::idx().
pub const PIECE_VALUES: [i32; 2] = [100, 250];

const ADVANCE_BONUS: i32 = 3;
const CENTRE_BONUS: i32 = 6;
const BACK_RANK_BONUS: i32 = 8;
const KING_CENTRE_BONUS: i32 = 2;
const TEMPO_BONUS: i32 = 3;

/// Evaluates the position from `to_move`'s perspective.
///
/// Material only when `positional` is false. Otherwise men are rewarded for
/// advancing, for holding the centre and for guarding their own back rank;
/// kings for centralisation; and in the endgame the side ahead is pushed to
/// close in on the enemy.
pub fn evaluate(board: &Board, to_move: Color, positional: bool) -> i32 {
    let mut score = material(board, Color::Red) - material(board, Color::Black);
    if positional {
        score += positional_score(board, Color::Red) - positional_score(board, Color::Black);
        score += endgame_tempo(board, score);
    }

    if to_move == Color::Red {
        score
    } else {
        -score
    }
}

pub fn material(board: &Board, color: Color) -> i32 {
    board
        .occupied()
        .filter(|(_, pc)| pc.color == color)
        .map(|(_, pc)| PIECE_VALUES[pc.rank.idx()])
        .sum()
}

/// Rows a man of `color` has advanced from its own back rank.
fn advancement(sq: Square, color: Color, size: u8) -> i32 {
    match color {
        Color::Red => (size - 1 - sq.row) as i32,
        Color::Black => sq.row as i32,
    }
}

/// Doubled Manhattan distance from the board centre.
fn centre_distance(sq: Square, size: u8) -> i32 {
    let mid = size as i32 - 1;
    (2 * sq.row as i32 - mid).abs() + (2 * sq.col as i32 - mid).abs()
}

fn in_centre(sq: Square, size: u8) -> bool {
    let lo = size / 4;
    let hi = size - size / 4;
    (lo..hi).contains(&sq.row) && (lo..hi).contains(&sq.col)
}

fn positional_score(board: &Board, color: Color) -> i32 {
    let n = board.size();
    let back_rank = color.other().promotion_row(n);
    let mut score = 0;
    for (sq, pc) in board.occupied().filter(|(_, pc)| pc.color == color) {
        match pc.rank {
            Rank::Man => {
                score += ADVANCE_BONUS * advancement(sq, color, n);
                if in_centre(sq, n) {
                    score += CENTRE_BONUS;
                }
                if sq.row == back_rank {
                    score += BACK_RANK_BONUS;
                }
            }
            Rank::King => {
                score += KING_CENTRE_BONUS * (2 * (n as i32 - 1) - centre_distance(sq, n)) / 2;
            }
        }
    }
    score
}

/// Once few pieces remain, the side ahead gains for every king near an
/// enemy piece. `lead` is red's advantage so far.
fn endgame_tempo(board: &Board, lead: i32) -> i32 {
    let n = board.size();
    if lead == 0 || board.piece_count() > n as usize {
        return 0;
    }
    let (ahead, sign) = if lead > 0 {
        (Color::Red, 1)
    } else {
        (Color::Black, -1)
    };
    let enemies = board.pieces(ahead.other());
    let mut bonus = 0;
    for king in board
        .occupied()
        .filter(|(_, pc)| pc.color == ahead && pc.is_king())
        .map(|(sq, _)| sq)
    {
        let nearest = enemies
            .iter()
            .map(|e| (king.row.abs_diff(e.row)).max(king.col.abs_diff(e.col)) as i32)
            .min()
            .unwrap_or(n as i32);
        bonus += TEMPO_BONUS * (n as i32 - nearest);
    }
    sign * bonus
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
