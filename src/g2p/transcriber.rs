use crate::error::Result;
use crate::g2p::normalize::{RuleSet, default_rule_set};
use crate::g2p::unit_table::{UnitTable, build_unit_table};

/// Rule-based grapheme-to-phoneme transcriber for text without a dictionary.
///
/// Segments lowercased input greedily, longest unit first, and emits each
/// unit's phonetic symbols. Characters no unit covers (digits, punctuation,
/// whitespace, letters outside a-z) are copied through unchanged, so
/// [`transcribe`](Self::transcribe) has no failure mode.
#[derive(Debug, Clone)]
pub struct GraphemeTranscriber {
    table: UnitTable,
    rules: RuleSet,
}

impl GraphemeTranscriber {
    pub fn new(table: UnitTable, rules: RuleSet) -> Self {
        Self { table, rules }
    }

    /// Transcriber over the built-in unit table and rule set.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(build_unit_table()?, default_rule_set()))
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Case is folded by uppercasing and then lowercasing, so text and its
    /// uppercase form always transcribe the same (`ß` and `SS` both become `ss`).
    pub fn transcribe(&self, text: &str) -> String {
        let folded = text.to_uppercase().to_lowercase();
        let segmented = self.segment(&folded);
        self.rules.apply(&segmented)
    }

    /// Longest-match segmentation and emission, without normalization.
    pub fn segment(&self, lowercase: &str) -> String {
        let mut output = String::with_capacity(lowercase.len() * 2);
        let mut rest = lowercase;

        while let Some(ch) = rest.chars().next() {
            // contains_length only accepts lengths on a char boundary
            let matched = self
                .table
                .candidate_lengths()
                .filter(|&len| self.table.contains_length(rest, len))
                .find_map(|len| {
                    let (unit, tail) = rest.split_at(len);
                    self.table.lookup(unit).map(|ipa| (ipa, tail))
                });

            match matched {
                Some((ipa, tail)) => {
                    output.push_str(ipa);
                    rest = tail;
                }
                None => {
                    output.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }

        output
    }
}
