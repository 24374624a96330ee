//! # Symptomscriber CLI
//!
//! ```bash
//! # Build/extend the dictionary from a data file, then offer a manual update
//! symptomscriber process data.csv
//!
//! # Non-interactive manual addition
//! symptomscriber add "nausea" "Low, Moderate, Severe"
//!
//! # List the dictionary
//! symptomscriber show
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level); the report goes to
//! stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use symptomscriber::{add_symptom, manual_session, process_data, report, store, Settings};
use tracing::info;

/// Command-line arguments for symptomscriber
#[derive(Parser, Debug)]
#[command(name = "symptomscriber")]
#[command(about = "Builds a symptom dictionary from patient records")]
#[command(version)]
struct Args {
    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dictionary file (overrides the settings file)
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// Column holding comma-separated symptoms (overrides the settings file)
    #[arg(long, global = true)]
    column: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, enhance and persist the dictionary from a CSV/TSV/JSON/XML file
    Process {
        /// Patient data file
        input: PathBuf,

        /// Skip the manual update question
        #[arg(long)]
        no_prompt: bool,
    },
    /// Add one symptom with the given comma-separated severity levels
    Add {
        symptom: String,
        severities: String,
    },
    /// Print the dictionary
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    if let Some(path) = args.dictionary {
        settings.dictionary_path = path;
    }
    if let Some(column) = args.column {
        settings.symptom_column = column;
    }
    info!(
        "Dictionary: {}, symptom column: {}",
        settings.dictionary_path.display(),
        settings.symptom_column
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let dictionary_exists = settings.dictionary_path.exists();
    let mut dictionary = store::load(&settings.dictionary_path).with_context(|| {
        format!("loading dictionary {}", settings.dictionary_path.display())
    })?;
    if !dictionary_exists {
        report::write_missing_dictionary(&mut out, &settings.dictionary_path)?;
    }

    match args.command {
        Command::Process { input, no_prompt } => {
            process_data(&input, &settings, &mut dictionary, &mut out)
                .with_context(|| format!("processing {}", input.display()))?;

            if !no_prompt {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                manual_session(&mut input, &mut out, &settings, &mut dictionary)
                    .context("manual update")?;
            }
        }
        Command::Add { symptom, severities } => {
            add_symptom(&mut out, &settings, &mut dictionary, &symptom, &severities)
                .context("manual update")?;
        }
        Command::Show => {
            report::write_dictionary(&mut out, &dictionary)?;
        }
    }

    out.flush()?;
    Ok(())
}
