//! Routes recognized text to the dictionary path or the grapheme fallback.
//!
//! Text in the router's native language goes through a [`PhoneticConverter`]
//! when one is loaded; every other language, and native text without a
//! dictionary, goes through the [`GraphemeTranscriber`].

use crate::config::Config;
use crate::converter::PhoneticConverter;
use crate::defaults;
use crate::dictionary::{PronouncingDictionary, split_word};
use crate::error::{PhonoscribeError, Result};
use crate::g2p::{
    GraphemeTranscriber, UnitTable, build_unit_table, default_rule_set,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Suffix appended to unknown words emitted as text under [`MissingWordPolicy::Mark`].
pub const MISSING_WORD_MARKER: char = '*';

/// What to do with a native-language word the dictionary does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingWordPolicy {
    /// Transcribe the word with the grapheme fallback.
    Fallback,
    /// Emit the lowercased word followed by `*`.
    #[default]
    Mark,
    /// Fail the request with `WordNotFound`.
    Fail,
}

impl fmt::Display for MissingWordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingWordPolicy::Fallback => "fallback",
            MissingWordPolicy::Mark => "mark",
            MissingWordPolicy::Fail => "fail",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for MissingWordPolicy {
    type Err = PhonoscribeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "mark" => Ok(Self::Mark),
            "fail" => Ok(Self::Fail),
            other => Err(PhonoscribeError::ConfigInvalidValue {
                key: "router.missing_word".to_string(),
                message: format!(
                    "unknown policy '{}' (expected fallback, mark or fail)",
                    other
                ),
            }),
        }
    }
}

/// Which converter produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneticSource {
    Dictionary,
    Fallback,
}

/// Recognized text plus the language it was detected as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    pub text: String,
    pub language: String,
}

impl TranscriptionRequest {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Phonetic rendering of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub ipa: String,
    pub text: String,
    pub language: String,
    pub source: PhoneticSource,
    /// Words on the dictionary path that were missing from the dictionary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_words: Vec<String>,
}

/// Primary subtag of a language code, lowercased: `"en-US"` -> `"en"`.
pub fn primary_language(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

pub struct TranscriptionRouter {
    native_language: String,
    dictionary: Option<Arc<dyn PhoneticConverter>>,
    fallback: GraphemeTranscriber,
    missing_word: MissingWordPolicy,
}

impl fmt::Debug for TranscriptionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionRouter")
            .field("native_language", &self.native_language)
            .field("dictionary", &self.dictionary.as_ref().map(|d| d.name()))
            .field("missing_word", &self.missing_word)
            .finish_non_exhaustive()
    }
}

impl TranscriptionRouter {
    /// Router with only the grapheme fallback and the default native language.
    pub fn new(fallback: GraphemeTranscriber) -> Self {
        Self {
            native_language: defaults::NATIVE_LANGUAGE.to_string(),
            dictionary: None,
            fallback,
            missing_word: MissingWordPolicy::default(),
        }
    }

    pub fn with_native_language(mut self, language: &str) -> Self {
        self.native_language = primary_language(language);
        self
    }

    pub fn with_dictionary(mut self, dictionary: Arc<dyn PhoneticConverter>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_missing_word_policy(mut self, policy: MissingWordPolicy) -> Self {
        self.missing_word = policy;
        self
    }

    /// Build a router from configuration.
    ///
    /// Extra units are merged into the built-in table through the same
    /// conflict check, extra normalization rules run after the built-ins,
    /// and the dictionary is loaded from the configured path. Without a
    /// configured path the default locations are searched, and finding no
    /// dictionary there leaves the router on the grapheme fallback.
    pub fn from_config(config: &Config) -> Result<Self> {
        let table = build_unit_table()?;
        let table: UnitTable = if config.fallback.extra_units.is_empty() {
            table
        } else {
            table.extended(
                config
                    .fallback
                    .extra_units
                    .iter()
                    .map(|(unit, ipa)| (unit.clone(), ipa.clone())),
            )?
        };

        let rules = default_rule_set()
            .with_rules(config.fallback.normalization.iter().cloned());

        let mut router = Self::new(GraphemeTranscriber::new(table, rules))
            .with_native_language(&config.router.native_language)
            .with_missing_word_policy(config.router.missing_word);

        let dictionary = match &config.router.dictionary {
            Some(path) => Some(PronouncingDictionary::from_file(path)?),
            None => match PronouncingDictionary::from_default_location() {
                Ok(dictionary) => Some(dictionary),
                Err(PhonoscribeError::DictionaryNotFound { path }) => {
                    tracing::debug!(searched = %path, "no pronouncing dictionary found");
                    None
                }
                Err(e) => return Err(e),
            },
        };
        if let Some(dictionary) = dictionary {
            router = router.with_dictionary(Arc::new(dictionary));
        }

        Ok(router)
    }

    pub fn native_language(&self) -> &str {
        &self.native_language
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    pub fn fallback(&self) -> &GraphemeTranscriber {
        &self.fallback
    }

    /// Produce the phonetic rendering of a request.
    ///
    /// Only the dictionary path can fail, and only under
    /// [`MissingWordPolicy::Fail`].
    pub fn route(&self, request: &TranscriptionRequest) -> Result<TranscriptionResult> {
        let language = primary_language(&request.language);

        let dictionary = self
            .dictionary
            .as_ref()
            .filter(|_| language == self.native_language);

        match dictionary {
            Some(dictionary) => {
                tracing::debug!(
                    language = %language,
                    converter = dictionary.name(),
                    "routing to dictionary path"
                );
                let (ipa, fallback_words) =
                    self.convert_with_dictionary(dictionary.as_ref(), &request.text)?;
                if !fallback_words.is_empty() {
                    tracing::debug!(
                        words = ?fallback_words,
                        policy = %self.missing_word,
                        "words missing from dictionary"
                    );
                }
                Ok(TranscriptionResult {
                    ipa,
                    text: request.text.clone(),
                    language,
                    source: PhoneticSource::Dictionary,
                    fallback_words,
                })
            }
            None => {
                tracing::debug!(language = %language, "routing to grapheme fallback");
                Ok(TranscriptionResult {
                    ipa: self.fallback.transcribe(&request.text),
                    text: request.text.clone(),
                    language,
                    source: PhoneticSource::Fallback,
                    fallback_words: Vec::new(),
                })
            }
        }
    }

    /// Convenience wrapper over [`route`](Self::route) returning only the IPA.
    pub fn route_text(&self, text: &str, language: &str) -> Result<String> {
        self.route(&TranscriptionRequest::new(text, language))
            .map(|result| result.ipa)
    }

    fn convert_with_dictionary(
        &self,
        dictionary: &dyn PhoneticConverter,
        text: &str,
    ) -> Result<(String, Vec<String>)> {
        let mut words = Vec::new();
        let mut missing = Vec::new();

        for token in text.split_whitespace() {
            let (prefix, core, suffix) = split_word(token);
            if core.is_empty() {
                words.push(token.to_string());
                continue;
            }

            let ipa = match dictionary.convert_word(core) {
                Ok(ipa) => ipa,
                Err(PhonoscribeError::WordNotFound { word }) => match self.missing_word {
                    MissingWordPolicy::Fail => {
                        return Err(PhonoscribeError::WordNotFound { word });
                    }
                    MissingWordPolicy::Mark => {
                        missing.push(word);
                        format!("{}{}", core.to_lowercase(), MISSING_WORD_MARKER)
                    }
                    MissingWordPolicy::Fallback => {
                        missing.push(word);
                        self.fallback.transcribe(core)
                    }
                },
                Err(e) => return Err(e),
            };
            words.push(format!("{}{}{}", prefix, ipa, suffix));
        }

        Ok((words.join(" "), missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::MockConverter;

    fn router_with_mock(policy: MissingWordPolicy) -> TranscriptionRouter {
        let mock = MockConverter::new()
            .with_word("hello", "həloʊ")
            .with_word("world", "wɝld");
        TranscriptionRouter::new(GraphemeTranscriber::with_defaults().unwrap())
            .with_dictionary(Arc::new(mock))
            .with_missing_word_policy(policy)
    }

    #[test]
    fn test_native_language_uses_dictionary() {
        let router = router_with_mock(MissingWordPolicy::Fallback);
        let result = router
            .route(&TranscriptionRequest::new("Hello world.", "en"))
            .unwrap();
        assert_eq!(result.ipa, "həloʊ wɝld.");
        assert_eq!(result.source, PhoneticSource::Dictionary);
        assert!(result.fallback_words.is_empty());
    }

    #[test]
    fn test_other_language_uses_fallback() {
        let router = router_with_mock(MissingWordPolicy::Fallback);
        let result = router
            .route(&TranscriptionRequest::new("hola", "es"))
            .unwrap();
        assert_eq!(result.ipa, "hoʊlɑ");
        assert_eq!(result.source, PhoneticSource::Fallback);
        assert_eq!(result.language, "es");
    }

    #[test]
    fn test_region_subtag_routes_like_primary() {
        let router = router_with_mock(MissingWordPolicy::Fallback);
        let result = router
            .route(&TranscriptionRequest::new("hello", "EN-us"))
            .unwrap();
        assert_eq!(result.source, PhoneticSource::Dictionary);
        assert_eq!(result.language, "en");
    }

    #[test]
    fn test_native_language_without_dictionary_falls_back() {
        let router = TranscriptionRouter::new(GraphemeTranscriber::with_defaults().unwrap());
        let result = router
            .route(&TranscriptionRequest::new("ship", "en"))
            .unwrap();
        assert_eq!(result.ipa, "ʃɪp");
        assert_eq!(result.source, PhoneticSource::Fallback);
    }

    #[test]
    fn test_missing_word_fallback_policy() {
        let router = router_with_mock(MissingWordPolicy::Fallback);
        let result = router
            .route(&TranscriptionRequest::new("hello ship!", "en"))
            .unwrap();
        assert_eq!(result.ipa, "həloʊ ʃɪp!");
        assert_eq!(result.fallback_words, vec!["ship".to_string()]);
    }

    #[test]
    fn test_missing_word_mark_policy() {
        let router = router_with_mock(MissingWordPolicy::Mark);
        let result = router
            .route(&TranscriptionRequest::new("Hello Zork", "en"))
            .unwrap();
        assert_eq!(result.ipa, "həloʊ zork*");
        assert_eq!(result.fallback_words, vec!["Zork".to_string()]);
    }

    #[test]
    fn test_missing_word_fail_policy() {
        let router = router_with_mock(MissingWordPolicy::Fail);
        let result = router.route(&TranscriptionRequest::new("hello zork", "en"));
        match result {
            Err(PhonoscribeError::WordNotFound { word }) => assert_eq!(word, "zork"),
            other => panic!("Expected WordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_policy_does_not_affect_fallback_languages() {
        let router = router_with_mock(MissingWordPolicy::Fail);
        assert_eq!(router.route_text("zork", "de").unwrap(), "zoʊɹk");
    }

    #[test]
    fn test_custom_native_language() {
        let mock = MockConverter::new().with_word("hallo", "halo");
        let router = TranscriptionRouter::new(GraphemeTranscriber::with_defaults().unwrap())
            .with_native_language("de")
            .with_dictionary(Arc::new(mock));
        assert_eq!(router.route_text("hallo", "de").unwrap(), "halo");
        assert_eq!(router.route_text("hallo", "en").unwrap(), "hɑlloʊ");
    }

    #[test]
    fn test_punctuation_only_tokens_kept() {
        let router = router_with_mock(MissingWordPolicy::Fail);
        assert_eq!(
            router.route_text("hello -- world ...", "en").unwrap(),
            "həloʊ -- wɝld ..."
        );
    }

    #[test]
    fn test_empty_text() {
        let router = router_with_mock(MissingWordPolicy::Fail);
        assert_eq!(router.route_text("", "en").unwrap(), "");
        assert_eq!(router.route_text("", "fr").unwrap(), "");
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(primary_language("en"), "en");
        assert_eq!(primary_language(" en-GB "), "en");
        assert_eq!(primary_language("pt_BR"), "pt");
        assert_eq!(primary_language(""), "");
    }

    #[test]
    fn test_default_policy_marks_unknown_words() {
        assert_eq!(MissingWordPolicy::default(), MissingWordPolicy::Mark);

        let router = TranscriptionRouter::new(GraphemeTranscriber::with_defaults().unwrap())
            .with_dictionary(Arc::new(MockConverter::new().with_word("hello", "həloʊ")));
        let result = router
            .route(&TranscriptionRequest::new("Hello Zork", "en"))
            .unwrap();
        assert_eq!(result.ipa, "həloʊ zork*");
        assert_eq!(result.fallback_words, vec!["Zork"]);
    }

    #[test]
    fn test_missing_word_policy_from_str() {
        assert_eq!(
            "fallback".parse::<MissingWordPolicy>().unwrap(),
            MissingWordPolicy::Fallback
        );
        assert_eq!(
            "MARK".parse::<MissingWordPolicy>().unwrap(),
            MissingWordPolicy::Mark
        );
        assert_eq!(
            "fail".parse::<MissingWordPolicy>().unwrap(),
            MissingWordPolicy::Fail
        );
        assert!("ignore".parse::<MissingWordPolicy>().is_err());
    }

    #[test]
    fn test_missing_word_policy_display_round_trips() {
        for policy in [
            MissingWordPolicy::Fallback,
            MissingWordPolicy::Mark,
            MissingWordPolicy::Fail,
        ] {
            assert_eq!(
                policy.to_string().parse::<MissingWordPolicy>().unwrap(),
                policy
            );
        }
    }

    #[test]
    fn test_result_json_shape() {
        let router = router_with_mock(MissingWordPolicy::Fallback);
        let result = router
            .route(&TranscriptionRequest::new("hello", "en"))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ipa"], "həloʊ");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["language"], "en");
        assert_eq!(json["source"], "dictionary");
        assert!(json.get("fallback_words").is_none());
    }

    #[test]
    fn test_router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranscriptionRouter>();
    }
}
