//! Command-line interface for phonoscribe
//!
//! Provides argument parsing using clap derive macros.

use crate::router::MissingWordPolicy;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Phonetic (IPA) transcription of recognized speech text
#[derive(Parser, Debug)]
#[command(
    name = "phonoscribe",
    version,
    about = "Phonetic (IPA) transcription of recognized speech text"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Text to transcribe. Reads one request per stdin line when omitted
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress diagnostics (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose diagnostics (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Language code of the text (e.g., en, es, hi)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// CMUdict-format pronouncing dictionary for the native language
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Handling of words missing from the dictionary (mark, fallback, fail)
    #[arg(long, value_name = "POLICY")]
    pub missing_word: Option<MissingWordPolicy>,

    /// Print one JSON object per result
    #[arg(long)]
    pub json: bool,

    /// Worker threads for stdin batch mode
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the grapheme unit table used by the fallback transcriber
    Units,

    /// Inspect configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration (file + environment overrides)
    Show,
    /// Dump a commented configuration template
    Dump,
}
