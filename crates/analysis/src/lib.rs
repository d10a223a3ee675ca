//! Analysis tools for ML-checkers
//!
//! This crate provides:
//! - Game records that save to and load from JSON
//! - A match runner for engine-vs-engine games
//! - A move annotator that grades every move of a recorded game
//!
//! # Usage
//!
//! ```bash
//! # Play ten games between two classical tiers and keep the records
//! cargo run -p analysis -- play classical:hard classical:easy --games 10 --out games.json
//!
//! # Grade every move of the saved games
//! cargo run -p analysis -- annotate games.json --depth 6
//! ```

mod annotate;
mod match_runner;
mod record;

pub use annotate::*;
pub use match_runner::*;
pub use record::*;
