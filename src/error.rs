//! Error types for phonoscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonoscribeError {
    // Unit table / rule set construction errors
    #[error("Conflicting mappings for unit '{unit}': '{existing}' vs '{conflicting}'")]
    DuplicateUnitKeyConflict {
        unit: String,
        existing: String,
        conflicting: String,
    },

    #[error("Invalid grapheme unit '{unit}': {reason}")]
    InvalidUnit { unit: String, reason: String },

    #[error("Invalid normalization rule '{from}': {reason}")]
    InvalidNormalizationRule { from: String, reason: String },

    // Dictionary errors
    #[error("Word not found in pronouncing dictionary: {word}")]
    WordNotFound { word: String },

    #[error("Pronouncing dictionary not found at {path}")]
    DictionaryNotFound { path: String },

    #[error("Malformed pronouncing dictionary at line {line}: {message}")]
    DictionaryParse { line: usize, message: String },

    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PhonoscribeError>;
