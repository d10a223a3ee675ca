use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::*;
use crate::variant::VariantConfig;
use crate::zobrist::ZOBRIST;

/// An N×N checkers board.
///
/// Boards are values: every operation that changes the position returns a
/// new board, so earlier boards kept in a history stay valid snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: u8,
    /// Row-major cells; light squares are always `None`.
    cells: Vec<Option<Piece>>,
}

/// Wire form of [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct RawBoard {
    size: u8,
    cells: Vec<Option<Piece>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = EngineError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let n = raw.size as usize;
        if raw.size < 2 || raw.size % 2 != 0 || raw.size > crate::variant::MAX_BOARD_SIZE {
            return Err(EngineError::MalformedBoard(format!("unsupported size {}", raw.size)));
        }
        if raw.cells.len() != n * n {
            return Err(EngineError::MalformedBoard(format!(
                "{} cells for a {n}x{n} board",
                raw.cells.len()
            )));
        }
        for (i, cell) in raw.cells.iter().enumerate() {
            let sq = Square::new((i / n) as u8, (i % n) as u8);
            if cell.is_some() && !sq.is_dark() {
                return Err(EngineError::LightSquare(sq));
            }
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    pub fn empty(size: u8) -> Self {
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Starting position: black on the dark squares of the top `piece_rows`
    /// rows, red on the bottom `piece_rows` rows. Deterministic for a config.
    pub fn initial(config: &VariantConfig) -> Self {
        let mut board = Self::empty(config.size);
        let n = config.size;
        for row in 0..n {
            let color = if row < config.piece_rows {
                Color::Black
            } else if row >= n - config.piece_rows {
                Color::Red
            } else {
                continue;
            };
            for col in 0..n {
                let sq = Square::new(row, col);
                if sq.is_dark() {
                    board.put(sq, Some(Piece::man(color)));
                }
            }
        }
        board
    }

    /// Builds a board of `size` holding exactly the listed pieces.
    pub fn from_pieces(size: u8, pieces: &[(Square, Piece)]) -> Result<Self, EngineError> {
        let mut board = Self::empty(size);
        for &(sq, pc) in pieces {
            board.check_square(sq)?;
            board.put(sq, Some(pc));
        }
        Ok(board)
    }

    /// Parses a diagram with one line per row, top row first.
    ///
    /// `.` / `-` / `_` mark empty squares, `r`/`b` men and `R`/`B` kings.
    /// Whitespace inside a line is ignored.
    pub fn from_diagram(text: &str) -> Result<Self, EngineError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        let size = rows.len();
        if size < 2 || size > crate::variant::MAX_BOARD_SIZE as usize {
            return Err(EngineError::Diagram(format!("unsupported size {size}")));
        }
        let mut board = Self::empty(size as u8);
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != size {
                return Err(EngineError::Diagram(format!(
                    "row {row} has {} squares, expected {size}",
                    chars.len()
                )));
            }
            for (col, &ch) in chars.iter().enumerate() {
                let sq = Square::new(row as u8, col as u8);
                match ch {
                    '.' | '-' | '_' => {}
                    _ => {
                        let piece = Piece::from_char(ch)
                            .ok_or_else(|| EngineError::Diagram(format!("bad piece '{ch}'")))?;
                        if !sq.is_dark() {
                            return Err(EngineError::LightSquare(sq));
                        }
                        board.put(sq, Some(piece));
                    }
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if sq.in_bounds(self.size) {
            self.cells[sq.index(self.size)]
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, pc: Option<Piece>) {
        let idx = sq.index(self.size);
        self.cells[idx] = pc;
    }

    fn check_square(&self, sq: Square) -> Result<(), EngineError> {
        if !sq.in_bounds(self.size) {
            return Err(EngineError::OutOfBounds {
                square: sq,
                size: self.size,
            });
        }
        if !sq.is_dark() {
            return Err(EngineError::LightSquare(sq));
        }
        Ok(())
    }

    /// Returns a copy with `piece` placed on `sq`.
    pub fn with_piece(&self, sq: Square, piece: Piece) -> Result<Self, EngineError> {
        self.check_square(sq)?;
        let mut next = self.clone();
        next.put(sq, Some(piece));
        Ok(next)
    }

    /// Returns a copy with `sq` emptied.
    pub fn without_piece(&self, sq: Square) -> Result<Self, EngineError> {
        self.check_square(sq)?;
        let mut next = self.clone();
        next.put(sq, None);
        Ok(next)
    }

    /// All occupied squares with their pieces, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let n = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, pc)| {
            pc.map(|p| (Square::new((i / n as usize) as u8, (i % n as usize) as u8), p))
        })
    }

    /// Squares holding pieces of `color`, in row-major order.
    pub fn pieces(&self, color: Color) -> Vec<Square> {
        self.occupied()
            .filter(|(_, p)| p.color == color)
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().flatten().filter(|p| p.color == color).count()
    }

    pub fn count_rank(&self, color: Color, rank: Rank) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.color == color && p.rank == rank)
            .count()
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Zobrist key of the piece layout (side to move not included).
    pub fn hash(&self) -> u64 {
        let mut h = 0u64;
        for (sq, pc) in self.occupied() {
            h ^= ZOBRIST.piece_key(pc, sq.row, sq.col);
        }
        h
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = self
                    .piece_at(Square::new(row, col))
                    .map(Piece::to_char)
                    .unwrap_or('.');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Key for a board together with the side to move.
pub fn position_key(board: &Board, to_move: Color) -> u64 {
    board.hash() ^ ZOBRIST.side_key(to_move)
}

/// Applies `mv` and returns the resulting board. The input board is untouched.
///
/// The moved piece is crowned when `to` lies on its promotion row; squares
/// passed through mid-chain never promote.
pub fn make_move(board: &Board, mv: &Move, _config: &VariantConfig) -> Result<Board, EngineError> {
    board.check_square(mv.from)?;
    board.check_square(mv.to)?;
    let moved = board.piece_at(mv.from).ok_or(EngineError::EmptySquare(mv.from))?;
    // Only a capture chain may finish on the square it left.
    let returns_home = mv.to == mv.from && !mv.captures.is_empty();
    if board.piece_at(mv.to).is_some() && !returns_home {
        return Err(EngineError::Occupied(mv.to));
    }

    let mut next = board.clone();
    next.put(mv.from, None);
    for &cap in &mv.captures {
        board.check_square(cap)?;
        // Checked against `next` so a square listed twice is rejected.
        match next.piece_at(cap) {
            Some(pc) if pc.color != moved.color => next.put(cap, None),
            _ => return Err(EngineError::NothingToCapture(cap)),
        }
    }

    let landed = if !moved.is_king() && mv.to.row == moved.color.promotion_row(board.size) {
        moved.crowned()
    } else {
        moved
    };
    next.put(mv.to, Some(landed));
    Ok(next)
}

/// Like [`make_move`], but also rejects moving a piece that is not `player`'s.
pub fn make_move_checked(
    board: &Board,
    mv: &Move,
    player: Color,
    config: &VariantConfig,
) -> Result<Board, EngineError> {
    match board.piece_at(mv.from) {
        Some(pc) if pc.color != player => Err(EngineError::WrongColor {
            square: mv.from,
            expected: player,
            found: pc.color,
        }),
        _ => make_move(board, mv, config),
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
