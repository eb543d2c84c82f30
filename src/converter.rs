use crate::error::{PhonoscribeError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Dictionary-backed word-to-IPA conversion for a router's native language.
///
/// This trait allows swapping implementations (a loaded pronouncing
/// dictionary vs a mock).
pub trait PhoneticConverter: Send + Sync {
    /// Convert a single word (no surrounding punctuation) to IPA.
    ///
    /// # Errors
    /// [`PhonoscribeError::WordNotFound`] when the word has no entry.
    fn convert_word(&self, word: &str) -> Result<String>;

    /// Name for logging/diagnostics.
    fn name(&self) -> &str;
}

impl<T: PhoneticConverter + ?Sized> PhoneticConverter for Arc<T> {
    fn convert_word(&self, word: &str) -> Result<String> {
        (**self).convert_word(word)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Mock converter for testing
#[derive(Debug, Clone, Default)]
pub struct MockConverter {
    entries: HashMap<String, String>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to know a word (case-insensitive)
    pub fn with_word(mut self, word: &str, ipa: &str) -> Self {
        self.entries.insert(word.to_lowercase(), ipa.to_string());
        self
    }
}

impl PhoneticConverter for MockConverter {
    fn convert_word(&self, word: &str) -> Result<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .ok_or_else(|| PhonoscribeError::WordNotFound {
                word: word.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
