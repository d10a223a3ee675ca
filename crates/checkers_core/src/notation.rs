//! Square numbering, move text and PDN FEN.
//!
//! Dark squares are numbered from 1, row by row starting at row 0 (black's
//! side), left to right. On an 8×8 board black starts on 1..=12 and red on
//! 21..=32. In FEN, `W` stands for red and `B` for black.

use crate::board::Board;
use crate::error::EngineError;
use crate::rules::legal_moves;
use crate::types::*;
use crate::variant::VariantConfig;

/// 1-based number of a dark square.
pub fn square_number(sq: Square, size: u8) -> u32 {
    let per_row = size as u32 / 2;
    sq.row as u32 * per_row + sq.col as u32 / 2 + 1
}

/// Square for a 1-based number, if it exists on a `size` board.
pub fn number_to_square(n: u32, size: u8) -> Option<Square> {
    let per_row = size as u32 / 2;
    if n == 0 || n > per_row * size as u32 {
        return None;
    }
    let k = n - 1;
    let row = k / per_row;
    let col = 2 * (k % per_row) + if row % 2 == 0 { 1 } else { 0 };
    Some(Square::new(row as u8, col as u8))
}

/// `11-15` for a step, `22x15x6` for a capture listing every landing square.
pub fn move_to_notation(mv: &Move, size: u8) -> String {
    let squares: Vec<Square> = if mv.path.len() >= 2 {
        mv.path.clone()
    } else {
        vec![mv.from, mv.to]
    };
    let sep = if mv.is_capture() { "x" } else { "-" };
    squares
        .iter()
        .map(|&s| square_number(s, size).to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

fn parse_numbers(text: &str, size: u8) -> Result<Vec<Square>, EngineError> {
    text.split(|c: char| c == '-' || c == 'x' || c == 'X' || c == ':')
        .map(|part| {
            let n: u32 = part
                .trim()
                .parse()
                .map_err(|_| EngineError::Notation(format!("bad square `{part}` in `{text}`")))?;
            number_to_square(n, size)
                .ok_or_else(|| EngineError::Notation(format!("no square {n} on a {size}-board")))
        })
        .collect()
}

/// Finds the legal move written as `text`.
///
/// Accepts the full path or just `from` and `to` when that is unambiguous.
pub fn parse_move(
    board: &Board,
    player: Color,
    text: &str,
    config: &VariantConfig,
) -> Result<Move, EngineError> {
    let squares = parse_numbers(text.trim(), board.size())?;
    if squares.len() < 2 {
        return Err(EngineError::Notation(format!("`{text}` needs at least two squares")));
    }
    let from = squares[0];
    let to = squares[squares.len() - 1];

    let legal = legal_moves(board, player, config);
    if let Some(exact) = legal.iter().find(|m| m.path == squares) {
        return Ok(exact.clone());
    }
    if squares.len() > 2 {
        return Err(EngineError::IllegalMove(text.to_string()));
    }
    let mut candidates: Vec<Move> = legal
        .into_iter()
        .filter(|m| m.from == from && m.to == to)
        .collect();
    match candidates.len() {
        0 => Err(EngineError::IllegalMove(text.to_string())),
        1 => Ok(candidates.remove(0)),
        _ => Err(EngineError::Notation(format!(
            "`{text}` is ambiguous, give every landing square"
        ))),
    }
}

/// PDN FEN, e.g. `B:W21,22,K30:B1,2,3`.
pub fn to_fen(board: &Board, to_move: Color) -> String {
    let side = |c: Color| match c {
        Color::Red => 'W',
        Color::Black => 'B',
    };
    let mut out = String::new();
    out.push(side(to_move));
    for color in Color::ALL {
        out.push(':');
        out.push(side(color));
        let list: Vec<String> = board
            .occupied()
            .filter(|(_, p)| p.color == color)
            .map(|(sq, p)| {
                let n = square_number(sq, board.size());
                if p.is_king() {
                    format!("K{n}")
                } else {
                    n.to_string()
                }
            })
            .collect();
        out.push_str(&list.join(","));
    }
    out
}

/// Parses PDN FEN for a `size` board. Ranges such as `1-12` are accepted.
pub fn from_fen(text: &str, size: u8) -> Result<(Board, Color), EngineError> {
    let bad = |why: &str| EngineError::Notation(format!("{why} in FEN `{text}`"));
    let text_trim = text.trim().trim_end_matches('.');
    let mut fields = text_trim.split(':');
    let to_move = match fields.next().map(str::trim) {
        Some("W") => Color::Red,
        Some("B") => Color::Black,
        _ => return Err(bad("missing side to move")),
    };

    let mut board = Board::empty(size);
    for field in fields {
        let field = field.trim();
        let (color, list) = match field.chars().next() {
            Some('W') => (Color::Red, &field[1..]),
            Some('B') => (Color::Black, &field[1..]),
            _ => return Err(bad("unknown piece list")),
        };
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (king, item) = match item.strip_prefix('K') {
                Some(rest) => (true, rest),
                None => (false, item),
            };
            let numbers: Vec<u32> = match item.split_once('-') {
                Some((lo, hi)) => {
                    let lo: u32 = lo.parse().map_err(|_| bad("bad range"))?;
                    let hi: u32 = hi.parse().map_err(|_| bad("bad range"))?;
                    (lo..=hi).collect()
                }
                None => vec![item.parse().map_err(|_| bad("bad square"))?],
            };
            for n in numbers {
                let sq = number_to_square(n, size).ok_or_else(|| bad("square out of range"))?;
                let piece = if king { Piece::king(color) } else { Piece::man(color) };
                board = board.with_piece(sq, piece)?;
            }
        }
    }
    Ok((board, to_move))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
