//! Rule-set configuration for the supported checkers variants.
//!
//! A [`VariantConfig`] is looked up once per game and passed explicitly into
//! every engine call. Built-in variants are available by name; custom
//! variants can be declared in TOML and resolved through a [`VariantRegistry`].

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::outcome::DrawPolicy;
use crate::types::Color;

/// Largest supported board edge. Zobrist keys are generated for this size.
pub const MAX_BOARD_SIZE: u8 = 16;

/// Named built-in variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    American,
    Brazilian,
    International,
    Canadian,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::American,
        Variant::Brazilian,
        Variant::International,
        Variant::Canadian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::American => "american",
            Variant::Brazilian => "brazilian",
            Variant::International => "international",
            Variant::Canadian => "canadian",
        }
    }

    pub fn config(self) -> VariantConfig {
        let (size, piece_rows, flying, backward, maximum, first) = match self {
            Variant::American => (8, 3, false, false, false, Color::Black),
            Variant::Brazilian => (8, 3, true, true, true, Color::Red),
            Variant::International => (10, 4, true, true, true, Color::Red),
            Variant::Canadian => (12, 5, true, true, true, Color::Red),
        };
        VariantConfig {
            name: self.name().to_string(),
            size,
            piece_rows,
            flying_kings: flying,
            allow_backward_capture: backward,
            mandatory_capture: true,
            maximum_capture: maximum,
            first_to_move: first,
            draw: DrawPolicy::default(),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "american" | "english" => Ok(Variant::American),
            "brazilian" => Ok(Variant::Brazilian),
            "international" => Ok(Variant::International),
            "canadian" => Ok(Variant::Canadian),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Rules that shape board geometry, movement and captures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Board edge length. Must be even.
    pub size: u8,
    /// Rows filled with pieces for each side at setup.
    pub piece_rows: u8,
    /// Kings may slide any distance along a free diagonal.
    #[serde(default)]
    pub flying_kings: bool,
    /// Men may capture backward.
    #[serde(default)]
    pub allow_backward_capture: bool,
    #[serde(default = "default_true")]
    pub mandatory_capture: bool,
    /// Only the capture sequences removing the most pieces are legal.
    #[serde(default)]
    pub maximum_capture: bool,
    #[serde(default = "default_first")]
    pub first_to_move: Color,
    #[serde(default)]
    pub draw: DrawPolicy,
}

fn default_name() -> String {
    "custom".to_string()
}
fn default_true() -> bool {
    true
}
fn default_first() -> Color {
    Color::Red
}

impl Default for VariantConfig {
    fn default() -> Self {
        Variant::American.config()
    }
}

impl VariantConfig {
    /// Look up a built-in variant by name. Equal names always yield equal configs.
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        Ok(name.parse::<Variant>()?.config())
    }

    pub fn american() -> Self {
        Variant::American.config()
    }
    pub fn international() -> Self {
        Variant::International.config()
    }

    /// Checks the invariants the engine relies on.
    ///
    /// The engine trusts its config; callers that accept external rule-sets
    /// should run this once when loading them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            name: self.name.clone(),
            reason,
        };
        if self.size < 4 || self.size > MAX_BOARD_SIZE {
            return Err(invalid(format!(
                "size {} outside 4..={}",
                self.size, MAX_BOARD_SIZE
            )));
        }
        if self.size % 2 != 0 {
            return Err(invalid(format!("size {} must be even", self.size)));
        }
        if self.piece_rows == 0 {
            return Err(invalid("piece_rows must be at least 1".to_string()));
        }
        if 2 * self.piece_rows >= self.size {
            return Err(invalid(format!(
                "{} piece rows per side leave no empty middle on a {}-board",
                self.piece_rows, self.size
            )));
        }
        if self.draw.repetition_limit == 1 {
            return Err(invalid("repetition_limit must be 0 or at least 2".to_string()));
        }
        Ok(())
    }

    /// Number of dark squares on the board.
    pub fn playable_squares(&self) -> usize {
        self.size as usize * self.size as usize / 2
    }
}

#[derive(Debug, Default, Deserialize)]
struct VariantFile {
    #[serde(default, rename = "variant")]
    variants: Vec<VariantConfig>,
}

/// Resolves variant names against custom declarations first, then built-ins.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    custom: BTreeMap<String, VariantConfig>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `[[variant]]` tables from TOML and validates each one.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: VariantFile = toml::from_str(text)?;
        let mut registry = Self::new();
        for config in file.variants {
            registry.register(config)?;
        }
        Ok(registry)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            variants = registry.custom.len(),
            "loaded custom variants"
        );
        Ok(registry)
    }

    pub fn register(&mut self, config: VariantConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.custom.insert(config.name.to_ascii_lowercase(), config);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<VariantConfig, ConfigError> {
        match self.custom.get(&name.trim().to_ascii_lowercase()) {
            Some(config) => Ok(config.clone()),
            None => VariantConfig::named(name),
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Variant::ALL.iter().map(|v| v.name().to_string()).collect();
        names.extend(self.custom.keys().cloned());
        names
    }
}

#[cfg(test)]
#[path = "variant_tests.rs"]
mod variant_tests;
