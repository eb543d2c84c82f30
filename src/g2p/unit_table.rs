//! Grapheme unit table: orthographic units mapped to IPA symbol sequences.
//!
//! The table is built once from a fixed list of entries and is immutable
//! afterwards. Construction rejects a unit defined twice with two different
//! phonetic values instead of keeping whichever came last.

use crate::error::{PhonoscribeError, Result};
use std::collections::HashMap;

/// Longest orthographic unit a table may contain, in letters.
pub const MAX_UNIT_LENGTH: usize = 4;

/// Built-in units, single letters first, then digraphs and longer clusters.
pub const DEFAULT_UNITS: &[(&str, &str)] = &[
    // Single letters
    ("a", "ɑ"),
    ("b", "b"),
    ("c", "k"),
    ("d", "d"),
    ("e", "ɛ"),
    ("f", "f"),
    ("g", "ɡ"),
    ("h", "h"),
    ("i", "ɪ"),
    ("j", "d͡ʒ"),
    ("k", "k"),
    ("l", "l"),
    ("m", "m"),
    ("n", "n"),
    ("o", "oʊ"),
    ("p", "p"),
    ("q", "k"),
    ("r", "ɹ"),
    ("s", "s"),
    ("t", "t"),
    ("u", "ʊ"),
    ("v", "v"),
    ("w", "w"),
    ("x", "ks"),
    ("y", "j"),
    ("z", "z"),
    // Consonant clusters
    ("th", "θ"),
    ("dh", "ð"),
    ("sh", "ʃ"),
    ("zh", "ʒ"),
    ("ch", "tʃ"),
    ("jh", "dʒ"),
    ("ng", "ŋ"),
    ("ph", "f"),
    ("gh", "ɡ"),
    ("kh", "k"),
    ("wh", "w"),
    ("ck", "k"),
    ("qu", "kw"),
    ("sch", "ʃ"),
    ("tion", "ʃən"),
    // Vowel digraphs
    ("ea", "iːə"),
    ("ee", "iː"),
    ("ai", "aɪ"),
    ("ay", "eɪ"),
    ("oa", "oʊ"),
    ("oo", "uː"),
    ("ou", "aʊ"),
    ("oy", "ɔɪ"),
    ("au", "ɑʊ"),
    ("aw", "ɔ"),
    ("ew", "ju"),
    ("oi", "ɔɪ"),
    ("ow", "oʊ"),
];

/// Immutable mapping from grapheme units to phonetic symbol sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    units: HashMap<String, String>,
    max_unit_length: usize,
}

impl UnitTable {
    /// Build a table from `(unit, ipa)` pairs.
    ///
    /// A unit listed twice with the same value is accepted. A unit listed
    /// twice with different values fails with
    /// [`PhonoscribeError::DuplicateUnitKeyConflict`]. Units must be 1 to
    /// [`MAX_UNIT_LENGTH`] lowercase ASCII letters and values must be non-empty.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut units: HashMap<String, String> = HashMap::new();
        let mut max_unit_length = 0;

        for (unit, ipa) in entries {
            let unit = unit.into();
            let ipa = ipa.into();
            validate_unit(&unit, &ipa)?;

            if let Some(existing) = units.get(&unit) {
                if *existing != ipa {
                    return Err(PhonoscribeError::DuplicateUnitKeyConflict {
                        unit,
                        existing: existing.clone(),
                        conflicting: ipa,
                    });
                }
                tracing::trace!(unit = %unit, "redundant unit definition");
                continue;
            }

            max_unit_length = max_unit_length.max(unit.len());
            units.insert(unit, ipa);
        }

        Ok(Self {
            units,
            max_unit_length,
        })
    }

    /// Return a new table with `extra` merged in, applying the same checks.
    pub fn extended<I, K, V>(&self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let base = self
            .units
            .iter()
            .map(|(unit, ipa)| (unit.clone(), ipa.clone()));
        let extra = extra
            .into_iter()
            .map(|(unit, ipa)| (unit.into(), ipa.into()));
        Self::from_entries(base.chain(extra))
    }

    /// Phonetic symbols for an exact unit.
    pub fn lookup(&self, unit: &str) -> Option<&str> {
        self.units.get(unit).map(String::as_str)
    }

    /// Length in letters of the longest unit in the table.
    pub fn max_unit_length(&self) -> usize {
        self.max_unit_length
    }

    /// Whether the first `n` bytes of `s` form a unit in the table.
    ///
    /// Returns false when `s` is shorter than `n` or `n` does not fall on a
    /// character boundary.
    pub fn contains_length(&self, s: &str, n: usize) -> bool {
        s.get(..n).is_some_and(|prefix| self.units.contains_key(prefix))
    }

    /// Candidate unit lengths, longest first.
    pub fn candidate_lengths(&self) -> impl Iterator<Item = usize> {
        (1..=self.max_unit_length).rev()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All entries sorted longest unit first, then alphabetically.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .units
            .iter()
            .map(|(unit, ipa)| (unit.as_str(), ipa.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
        entries
    }
}

fn validate_unit(unit: &str, ipa: &str) -> Result<()> {
    let reason = if unit.is_empty() {
        Some("unit is empty".to_string())
    } else if unit.len() > MAX_UNIT_LENGTH {
        Some(format!("longer than {} letters", MAX_UNIT_LENGTH))
    } else if !unit.bytes().all(|b| b.is_ascii_lowercase()) {
        Some("only lowercase letters a-z are allowed".to_string())
    } else if ipa.is_empty() {
        Some("phonetic value is empty".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PhonoscribeError::InvalidUnit {
            unit: unit.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Build the built-in unit table.
pub fn build_unit_table() -> Result<UnitTable> {
    let table = UnitTable::from_entries(DEFAULT_UNITS.iter().copied())?;
    tracing::debug!(
        units = table.len(),
        max_unit_length = table.max_unit_length(),
        "built grapheme unit table"
    );
    Ok(table)
}
