use crate::defaults;
use crate::error::{PhonoscribeError, Result};
use crate::g2p::{MAX_UNIT_LENGTH, NormalizationRule};
use crate::router::MissingWordPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub router: RouterConfig,
    pub fallback: FallbackConfig,
    pub batch: BatchConfig,
}

/// Language routing and dictionary configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    pub native_language: String,
    pub default_language: String,
    pub dictionary: Option<PathBuf>,
    pub missing_word: MissingWordPolicy,
}

/// Additions to the built-in grapheme fallback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FallbackConfig {
    pub extra_units: BTreeMap<String, String>,
    pub normalization: Vec<NormalizationRule>,
}

/// Batch transcription configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            native_language: defaults::NATIVE_LANGUAGE.to_string(),
            default_language: defaults::DEFAULT_LANGUAGE.to_string(),
            dictionary: None,
            missing_word: MissingWordPolicy::default(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: defaults::BATCH_WORKERS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(PhonoscribeError::Config)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound) =>
            {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PHONOSCRIBE_LANGUAGE → router.default_language
    /// - PHONOSCRIBE_NATIVE_LANGUAGE → router.native_language
    /// - PHONOSCRIBE_DICTIONARY → router.dictionary
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(language) = env_override("LANGUAGE") {
            self.router.default_language = language;
        }

        if let Some(language) = env_override("NATIVE_LANGUAGE") {
            self.router.native_language = language;
        }

        if let Some(path) = env_override("DICTIONARY") {
            self.router.dictionary = Some(PathBuf::from(path));
        }

        self
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.router.native_language.trim().is_empty() {
            return Err(invalid("router.native_language", "must not be empty"));
        }
        if self.router.default_language.trim().is_empty() {
            return Err(invalid("router.default_language", "must not be empty"));
        }
        if self.batch.workers == 0 {
            return Err(invalid("batch.workers", "must be at least 1"));
        }
        for unit in self.fallback.extra_units.keys() {
            if unit.is_empty() || unit.len() > MAX_UNIT_LENGTH {
                return Err(invalid(
                    "fallback.extra_units",
                    &format!("unit '{}' must be 1 to {} letters", unit, MAX_UNIT_LENGTH),
                ));
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/phonoscribe/config.toml on Linux
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("phonoscribe").join("config.toml"))
            .ok_or_else(|| PhonoscribeError::Other("Could not determine config directory".into()))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PhonoscribeError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Commented configuration template with every key at its default.
    pub fn dump_template() -> String {
        format!(
            r#"# phonoscribe configuration

[router]
# Language converted with the pronouncing dictionary
native_language = "{native}"
# Language assumed when none is given on the command line
default_language = "{language}"
# CMUdict-format pronouncing dictionary for the native language
# dictionary = "/usr/share/cmudict/cmudict.dict"
# Native-language words missing from the dictionary: fallback | mark | fail
missing_word = "mark"

[fallback.extra_units]
# Additional grapheme units (1-{max_len} lowercase letters); must not redefine built-ins
# igh = "aɪ"

# Additional normalization rules, applied after the built-in ones
# [[fallback.normalization]]
# from = "ɑʊ"
# to = "aʊ"

[batch]
# Worker threads for line-per-request stdin mode
workers = {workers}
"#,
            native = defaults::NATIVE_LANGUAGE,
            language = defaults::DEFAULT_LANGUAGE,
            max_len = MAX_UNIT_LENGTH,
            workers = defaults::BATCH_WORKERS,
        )
    }
}

fn env_override(suffix: &str) -> Option<String> {
    std::env::var(format!("{}_{}", defaults::ENV_PREFIX, suffix))
        .ok()
        .filter(|value| !value.is_empty())
}

fn invalid(key: &str, message: &str) -> PhonoscribeError {
    PhonoscribeError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
