//! # dmo CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dmo_cli::assess::{run_assess, AssessArgs};
use dmo_cli::catalog::{run_datasets, run_levels, run_taxonomy, ListArgs};
use dmo_cli::suggest::{run_suggest, SuggestArgs};

/// DMO data classification toolkit.
///
/// Lists the impact taxonomy and classification levels, suggests a tier
/// for a dataset description, and produces classification reports from
/// answers files.
#[derive(Parser, Debug)]
#[command(name = "dmo", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the impact questionnaire.
    Taxonomy(ListArgs),

    /// Print classification levels with their required controls.
    Levels(ListArgs),

    /// List the built-in example datasets.
    Datasets(ListArgs),

    /// Suggest a tier for a dataset description (advisory only).
    Suggest(SuggestArgs),

    /// Run an answers file through an assessment and print the report.
    Assess(AssessArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // JSON output on stdout stays parseable.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Taxonomy(args) => run_taxonomy(&args),
        Commands::Levels(args) => run_levels(&args),
        Commands::Datasets(args) => run_datasets(&args),
        Commands::Suggest(args) => run_suggest(&args),
        Commands::Assess(args) => run_assess(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
