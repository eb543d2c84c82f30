//! Default configuration constants for phonoscribe.
//!
//! Shared between the config types, the router and the CLI so the same
//! values are used everywhere.

/// Language whose text is converted with the pronouncing dictionary.
///
/// All other languages use the grapheme fallback.
pub const NATIVE_LANGUAGE: &str = "en";

/// Language assumed for requests that do not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default number of batch worker threads.
pub const BATCH_WORKERS: usize = 4;

/// Capacity of the bounded channels feeding batch workers.
pub const BATCH_QUEUE_CAPACITY: usize = 64;

/// Environment variable prefix for config overrides.
pub const ENV_PREFIX: &str = "PHONOSCRIBE";
