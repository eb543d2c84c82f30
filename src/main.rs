use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use phonoscribe::batch::transcribe_batch;
use phonoscribe::cli::{Cli, Commands, ConfigAction};
use phonoscribe::config::Config;
use phonoscribe::logging::init_logging;
use phonoscribe::output::{
    OutputFormat, fallback_note, format_unit_table, render_error, render_result,
};
use phonoscribe::router::{TranscriptionRequest, TranscriptionRouter};
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose)?;

    match &cli.command {
        None => {
            let config = load_config(&cli)?;
            let failures = run_transcription(&cli, &config)?;
            if failures > 0 {
                std::process::exit(1);
            }
        }
        Some(Commands::Units) => {
            let config = load_config(&cli)?;
            let router = TranscriptionRouter::from_config(&config)?;
            print!("{}", format_unit_table(router.fallback().table()));
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "phonoscribe",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration with file, environment, then CLI precedence.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };

    let mut config = config.with_env_overrides();
    if let Some(path) = &cli.dictionary {
        config.router.dictionary = Some(path.clone());
    }
    if let Some(policy) = cli.missing_word {
        config.router.missing_word = policy;
    }
    if let Some(workers) = cli.workers {
        config.batch.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

/// Transcribe the TEXT arguments, or stdin line by line when none are given.
///
/// Returns the number of requests that failed.
fn run_transcription(cli: &Cli, config: &Config) -> Result<usize> {
    let router = TranscriptionRouter::from_config(config)?;
    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| config.router.default_language.clone());
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let requests: Vec<TranscriptionRequest> = if !cli.text.is_empty() {
        vec![TranscriptionRequest::new(cli.text.join(" "), &language)]
    } else if !std::io::stdin().is_terminal() {
        read_stdin_requests(&language)?
    } else {
        Cli::command().print_help()?;
        return Ok(0);
    };

    tracing::info!(
        requests = requests.len(),
        language = %language,
        dictionary = router.has_dictionary(),
        "transcribing"
    );

    let results = transcribe_batch(&router, requests.clone(), config.batch.workers);

    let mut failures = 0;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(result) => {
                println!("{}", render_result(&result, format)?);
                if let Some(note) = fallback_note(&result)
                    && !cli.quiet
                {
                    eprintln!("{}", note.yellow());
                }
            }
            Err(e) => {
                failures += 1;
                match format {
                    OutputFormat::Json => println!("{}", render_error(&request.text, &e, format)?),
                    OutputFormat::Text => {
                        eprintln!("{}", render_error(&request.text, &e, format)?.red())
                    }
                }
            }
        }
    }

    Ok(failures)
}

fn read_stdin_requests(language: &str) -> Result<Vec<TranscriptionRequest>> {
    let stdin = std::io::stdin();
    let mut requests = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let text = line.trim();
        if !text.is_empty() {
            requests.push(TranscriptionRequest::new(text, language));
        }
    }
    Ok(requests)
}

fn handle_config_command(action: &ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let config_path = match custom_path {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };

    match action {
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
    }

    Ok(())
}
