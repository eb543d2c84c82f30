//! Post-segmentation normalization of phonetic output.
//!
//! Folds notational variants (tie-bar affricates) into the plain symbol
//! sequences the rest of the output uses.

use crate::error::{PhonoscribeError, Result};
use serde::{Deserialize, Serialize};

/// Tie-bar affricates folded to plain two-symbol sequences.
pub const DEFAULT_RULES: &[(&str, &str)] = &[("t͡ʃ", "tʃ"), ("d͡ʒ", "dʒ")];

/// A single rewrite: every occurrence of `from` becomes `to`.
///
/// The pattern is never empty; every constructor, deserialization included,
/// goes through [`NormalizationRule::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct NormalizationRule {
    from: String,
    to: String,
}

/// Unchecked rule as it appears in configuration files.
#[derive(Deserialize)]
struct RawRule {
    from: String,
    to: String,
}

impl TryFrom<RawRule> for NormalizationRule {
    type Error = PhonoscribeError;

    fn try_from(raw: RawRule) -> Result<Self> {
        Self::new(raw.from, raw.to)
    }
}

impl NormalizationRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let from = from.into();
        if from.is_empty() {
            return Err(PhonoscribeError::InvalidNormalizationRule {
                from,
                reason: "pattern is empty".to_string(),
            });
        }
        Ok(Self { from, to: to.into() })
    }

    /// Text matched in the phonetic output.
    pub fn pattern(&self) -> &str {
        &self.from
    }

    pub fn replacement(&self) -> &str {
        &self.to
    }
}

/// Ordered rule list applied in a single left-to-right pass.
///
/// At each position the first rule (in list order) whose pattern matches is
/// applied and scanning resumes after the matched input. Replacement text is
/// never scanned again, so rule output cannot feed another rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<NormalizationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<NormalizationRule>) -> Self {
        Self { rules }
    }

    /// Build a rule set from `(from, to)` pairs, rejecting empty patterns.
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(from, to)| NormalizationRule::new(from, to))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Append rules after the existing ones.
    pub fn with_rules(mut self, extra: impl IntoIterator<Item = NormalizationRule>) -> Self {
        self.rules.extend(extra);
        self
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, input: &str) -> String {
        if self.rules.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(ch) = rest.chars().next() {
            let matched = self
                .rules
                .iter()
                .find(|rule| !rule.from.is_empty() && rest.starts_with(&rule.from));
            match matched {
                Some(rule) => {
                    output.push_str(&rule.to);
                    rest = &rest[rule.from.len()..];
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

/// The built-in rule set.
pub fn default_rule_set() -> RuleSet {
    let rules = DEFAULT_RULES
        .iter()
        .map(|(from, to)| NormalizationRule {
            from: (*from).to_string(),
            to: (*to).to_string(),
        })
        .collect();
    RuleSet::new(rules)
}
