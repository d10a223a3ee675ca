use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}
impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }
    /// Row delta of a forward step. Red starts at the bottom and moves toward row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }
    /// Row on which a man of this color is crowned.
    pub fn promotion_row(self, size: u8) -> u8 {
        match self {
            Color::Red => 0,
            Color::Black => size - 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}
impl Rank {
    pub fn idx(self) -> usize {
        match self {
            Rank::Man => 0,
            Rank::King => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }
    pub fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }
    pub fn crowned(self) -> Self {
        Self::king(self.color)
    }

    /// Diagram character: `r`/`b` for men, `R`/`B` for kings.
    pub fn to_char(self) -> char {
        match (self.color, self.rank) {
            (Color::Red, Rank::Man) => 'r',
            (Color::Red, Rank::King) => 'R',
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
        }
    }
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::man(Color::Red)),
            'R' => Some(Self::king(Color::Red)),
            'b' => Some(Self::man(Color::Black)),
            'B' => Some(Self::king(Color::Black)),
            _ => None,
        }
    }
}

/// A board coordinate, 0-indexed from the top-left corner (black's side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the square only if it lies on a `size`×`size` board.
    pub fn checked(row: i16, col: i16, size: u8) -> Option<Self> {
        let n = size as i16;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, dr: i8, dc: i8, size: u8) -> Option<Self> {
        Self::checked(
            self.row as i16 + dr as i16,
            self.col as i16 + dc as i16,
            size,
        )
    }

    /// Pieces only ever stand on dark squares.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn in_bounds(self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    #[inline]
    pub fn index(self, size: u8) -> usize {
        self.row as usize * size as usize + self.col as usize
    }
}

impl From<(u8, u8)> for Square {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// The four diagonal directions as (row, col) deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A move is only meaningful relative to the board and variant it was generated for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Squares whose pieces are removed, in capture order.
    #[serde(default)]
    pub captures: Vec<Square>,
    /// Every landing square, starting with `from` and ending with `to`.
    #[serde(default)]
    pub path: Vec<Square>,
}

impl Move {
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captures: Vec::new(),
            path: vec![from, to],
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture() { "x" } else { "-" };
        let squares: Vec<String> = if self.path.len() >= 2 {
            self.path.iter().map(|s| s.to_string()).collect()
        } else {
            vec![self.from.to_string(), self.to.to_string()]
        };
        write!(f, "{}", squares.join(sep))
    }
}
