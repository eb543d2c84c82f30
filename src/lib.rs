//! phonoscribe - Phonetic (IPA) transcription of recognized speech text
//!
//! Dictionary conversion for the native language, grapheme-based
//! approximation for everything else.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod arpabet;
pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod converter;
pub mod defaults;
pub mod dictionary;
pub mod error;
pub mod g2p;
#[cfg(feature = "cli")]
pub mod logging;
pub mod output;
pub mod router;

// Core traits
pub use converter::PhoneticConverter;

// Transcription
pub use batch::transcribe_batch;
pub use dictionary::PronouncingDictionary;
pub use g2p::{GraphemeTranscriber, NormalizationRule, RuleSet, UnitTable};
pub use router::{
    MissingWordPolicy, PhoneticSource, TranscriptionRequest, TranscriptionResult,
    TranscriptionRouter,
};

// Error handling
pub use error::{PhonoscribeError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
