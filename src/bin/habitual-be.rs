//! habitual-be - habitual 'be' classifier CLI
//!
//! Flags occurrences of "be" in African American Language transcripts that
//! may be habitual and need a human look.
//!
//! # Usage
//!
//! ```bash
//! # One utterance
//! habitual-be classify "they be working"
//!
//! # Which rule decided each occurrence
//! habitual-be classify --explain "should be careful and be working"
//!
//! # A whole corpus
//! habitual-be annotate -i transcripts.csv -o annotated.csv --progress
//! ```
//!
//! Logging goes to stderr: `-v` for info, `-vv` for debug, or `RUST_LOG`.

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use habitual_be::cli::commands;
use habitual_be::cli::{color, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let result: Result<(), String> = match cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Annotate(args) => commands::annotate::run(args),
        Commands::Lexicon(args) => commands::lexicon::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "habitual-be", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
