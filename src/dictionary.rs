//! Pronouncing dictionary for the native-language path.
//!
//! Reads CMUdict-format files (`WORD  PH0 PH1 ...`) and converts each
//! pronunciation to IPA once at load time. Only the primary pronunciation of
//! a word is kept; numbered alternates such as `read(2)` are ignored when the
//! primary entry exists.

use crate::arpabet::arpabet_to_ipa;
use crate::converter::PhoneticConverter;
use crate::error::{PhonoscribeError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Conventional file name of the CMU pronouncing dictionary.
pub const CMUDICT_FILENAME: &str = "cmudict.dict";

/// System-wide install location used by distribution packages.
pub const SYSTEM_CMUDICT_PATH: &str = "/usr/share/cmudict/cmudict.dict";

/// Word-to-IPA dictionary loaded from a CMUdict-format file.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, String>,
    source: String,
}

impl PronouncingDictionary {
    /// Load a dictionary from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PhonoscribeError::DictionaryNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut dictionary = Self::parse(&content)?;
        dictionary.source = path.display().to_string();
        tracing::debug!(
            path = %path.display(),
            words = dictionary.len(),
            "loaded pronouncing dictionary"
        );
        Ok(dictionary)
    }

    /// Load from the first existing path in [`default_search_paths`].
    pub fn from_default_location() -> Result<Self> {
        let paths = default_search_paths();
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => Err(PhonoscribeError::DictionaryNotFound {
                path: paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Parse dictionary text.
    ///
    /// Lines starting with `;;;` are comments, and anything after `#` on an
    /// entry line is ignored. Entries without phones or with unknown ARPAbet
    /// symbols are rejected with the 1-based line number.
    pub fn parse(content: &str) -> Result<Self> {
        // word -> (ipa, from a primary headword)
        let mut entries: HashMap<String, (String, bool)> = HashMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(headword) = parts.next() else {
                continue;
            };
            let phones: Vec<&str> = parts.collect();
            if phones.is_empty() {
                return Err(PhonoscribeError::DictionaryParse {
                    line: line_no,
                    message: format!("entry '{}' has no phones", headword),
                });
            }

            let base = strip_variant_suffix(headword);
            let is_primary = base.len() == headword.len();
            let word = base.to_lowercase();
            match entries.get(&word) {
                Some((_, true)) => continue,
                Some((_, false)) if !is_primary => continue,
                _ => {}
            }

            let mut ipa = String::new();
            for phone in phones {
                let symbol =
                    arpabet_to_ipa(phone).ok_or_else(|| PhonoscribeError::DictionaryParse {
                        line: line_no,
                        message: format!("unknown ARPAbet symbol '{}'", phone),
                    })?;
                ipa.push_str(symbol);
            }
            entries.insert(word, (ipa, is_primary));
        }

        Ok(Self {
            entries: entries
                .into_iter()
                .map(|(word, (ipa, _))| (word, ipa))
                .collect(),
            source: "inline".to_string(),
        })
    }

    /// IPA for a single word, case-insensitive.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Strict sentence conversion: the first unknown word fails the call.
    ///
    /// Punctuation around words is kept; words are joined by single spaces.
    pub fn convert(&self, text: &str) -> Result<String> {
        let words = text
            .split_whitespace()
            .map(|token| {
                let (prefix, core, suffix) = split_word(token);
                if core.is_empty() {
                    return Ok(token.to_string());
                }
                let ipa = self.convert_word(core)?;
                Ok(format!("{}{}{}", prefix, ipa, suffix))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(words.join(" "))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the dictionary was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PhoneticConverter for PronouncingDictionary {
    fn convert_word(&self, word: &str) -> Result<String> {
        self.lookup(word)
            .map(str::to_string)
            .ok_or_else(|| PhonoscribeError::WordNotFound {
                word: word.to_string(),
            })
    }

    fn name(&self) -> &str {
        "cmudict"
    }
}

/// `read(2)` -> `read`
fn strip_variant_suffix(headword: &str) -> &str {
    match headword.find('(') {
        Some(pos) if headword.ends_with(')') && pos > 0 => &headword[..pos],
        _ => headword,
    }
}

/// Split a whitespace-delimited token into leading punctuation, the word
/// itself and trailing punctuation.
///
/// Inner punctuation such as the apostrophe in `don't` stays in the word.
pub fn split_word(token: &str) -> (&str, &str, &str) {
    let Some(start) = token.find(|c: char| c.is_alphanumeric()) else {
        return (token, "", "");
    };
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .and_then(|pos| token[pos..].chars().next().map(|c| pos + c.len_utf8()))
        .unwrap_or(token.len());
    (&token[..start], &token[start..end], &token[end..])
}

/// Candidate dictionary locations, most specific first.
///
/// - `$XDG_DATA_HOME/phonoscribe/cmudict.dict` (or the platform data dir)
/// - `/usr/share/cmudict/cmudict.dict`
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(data_dir) = dirs::data_dir() {
        paths.push(data_dir.join("phonoscribe").join(CMUDICT_FILENAME));
    }
    paths.push(PathBuf::from(SYSTEM_CMUDICT_PATH));
    paths
}
