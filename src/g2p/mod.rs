//! Grapheme-to-phoneme fallback mapper.
//!
//! Used for languages that have no pronouncing dictionary: greedy
//! longest-match segmentation over a fixed unit table, followed by a
//! normalization pass.

pub mod normalize;
pub mod transcriber;
pub mod unit_table;

pub use normalize::{NormalizationRule, RuleSet, default_rule_set};
pub use transcriber::GraphemeTranscriber;
pub use unit_table::{MAX_UNIT_LENGTH, UnitTable, build_unit_table};
