//! Recorded games and their JSON storage

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use checkers_core::{
    move_to_notation, Board, Color, ConfigError, EngineError, GameState, Move, VariantConfig, Winner,
};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record does not replay: {0}")]
    Replay(#[from] EngineError),

    #[error("record has invalid rules: {0}")]
    Variant(#[from] ConfigError),

    #[error("record board is {board}x{board} but its variant plays on {variant}x{variant}")]
    SizeMismatch { board: u8, variant: u8 },
}

/// A complete game: rules, starting position and every move played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub variant: VariantConfig,
    pub initial: Board,
    pub first_to_move: Color,
    pub moves: Vec<Move>,
    /// `None` while the game is unfinished.
    #[serde(default)]
    pub result: Option<Winner>,
    #[serde(default)]
    pub red: String,
    #[serde(default)]
    pub black: String,
}

impl GameRecord {
    /// An empty record starting from the variant's initial position.
    pub fn new(variant: &VariantConfig) -> Self {
        Self {
            variant: variant.clone(),
            initial: Board::initial(variant),
            first_to_move: variant.first_to_move,
            moves: Vec::new(),
            result: None,
            red: String::new(),
            black: String::new(),
        }
    }

    /// Record of `state`, which must have started from `initial`.
    pub fn from_game(variant: &VariantConfig, initial: Board, first_to_move: Color, state: &GameState) -> Self {
        Self {
            variant: variant.clone(),
            initial,
            first_to_move,
            moves: state.history.clone(),
            result: state.winner(),
            red: String::new(),
            black: String::new(),
        }
    }

    pub fn with_players(mut self, red: &str, black: &str) -> Self {
        self.red = red.to_string();
        self.black = black.to_string();
        self
    }

    /// Plays every recorded move from the start, checking each for legality.
    pub fn replay(&self) -> Result<GameState, EngineError> {
        let mut state = GameState::from_position(self.initial.clone(), self.first_to_move, &self.variant);
        for mv in &self.moves {
            state.play(mv, &self.variant)?;
        }
        Ok(state)
    }

    /// The board and side to move before each recorded move.
    pub fn positions(&self) -> Result<Vec<(Board, Color)>, EngineError> {
        let mut state = GameState::from_position(self.initial.clone(), self.first_to_move, &self.variant);
        let mut out = Vec::with_capacity(self.moves.len());
        for mv in &self.moves {
            out.push((state.board.clone(), state.to_move));
            state.play(mv, &self.variant)?;
        }
        Ok(out)
    }

    /// Numbered move text, two plies per move number: `1. 9-13 22-18 2. ...`.
    pub fn movetext(&self) -> String {
        let size = self.variant.size;
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let plies: Vec<String> = pair.iter().map(|mv| move_to_notation(mv, size)).collect();
                format!("{}. {}", i + 1, plies.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Save the record to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a record from a JSON file
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let contents = std::fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&contents)?;
        record.check()?;
        Ok(record)
    }

    /// Rejects records whose rules or starting board cannot be played.
    pub fn check(&self) -> Result<(), RecordError> {
        self.variant.validate()?;
        if self.initial.size() != self.variant.size {
            return Err(RecordError::SizeMismatch {
                board: self.initial.size(),
                variant: self.variant.size,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<GameRecord>),
    One(Box<GameRecord>),
}

/// Save several records as one JSON array
pub fn save_records(path: &Path, records: &[GameRecord]) -> Result<(), RecordError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load records from a file holding either one record or an array of them
pub fn load_records(path: &Path) -> Result<Vec<GameRecord>, RecordError> {
    let contents = std::fs::read_to_string(path)?;
    let records = match serde_json::from_str(&contents)? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![*record],
    };
    for record in &records {
        record.check()?;
    }
    Ok(records)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
