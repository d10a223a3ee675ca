//! Error types for the rules engine.
//!
//! Invalid input is a caller bug and is reported loudly. "No legal move" is
//! never an error: generators return empty lists and the outcome detector
//! turns that into a result.

use thiserror::Error;

use crate::types::{Color, Square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("square {square} is outside a {size}x{size} board")]
    OutOfBounds { square: Square, size: u8 },

    #[error("square {0} is a light square")]
    LightSquare(Square),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} belongs to {found}, expected {expected}")]
    WrongColor {
        square: Square,
        expected: Color,
        found: Color,
    },

    #[error("destination {0} is occupied")]
    Occupied(Square),

    #[error("capture square {0} holds no opponent piece")]
    NothingToCapture(Square),

    #[error("move {0} is not legal in this position")]
    IllegalMove(String),

    #[error("game is already over")]
    GameOver,

    #[error("invalid notation: {0}")]
    Notation(String),

    #[error("invalid board diagram: {0}")]
    Diagram(String),

    #[error("malformed board: {0}")]
    MalformedBoard(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),

    #[error("invalid variant `{name}`: {reason}")]
    Invalid { name: String, reason: String },

    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),

    #[error("failed to read variant file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse variant file: {0}")]
    Parse(#[from] toml::de::Error),
}
