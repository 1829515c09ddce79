//! Annotate command - batch classification of a CSV corpus

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use std::path::Path;
use std::time::Instant;

use super::super::output::{color, format_error, log_info};
use super::super::utils::load_config;

use crate::{AnnotationSummary, Classifier, Corpus};

/// Annotate a CSV corpus with feature counts
#[derive(Parser, Debug)]
pub struct AnnotateArgs {
    /// Input CSV with content and count columns
    #[arg(short, long, value_name = "PATH")]
    pub input: String,

    /// Output CSV
    #[arg(short, long, value_name = "PATH")]
    pub output: String,

    /// Config file (default: user config, else built-in defaults)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Annotate rows on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: AnnotateArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;

    let mut corpus = Corpus::read_csv(Path::new(&args.input), &config)
        .map_err(|e| format_error(&format!("Failed to read {}", args.input), &e.to_string()))?;
    log_info(
        &format!("Read {} rows from {}", corpus.len(), args.input),
        args.quiet,
    );

    let pb = if args.progress && !args.quiet && std::io::stderr().is_terminal() {
        let pb = ProgressBar::new(corpus.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| format!("Invalid progress template: {}", e))?;
        pb.set_style(style.progress_chars("#>-"));
        pb
    } else {
        ProgressBar::hidden()
    };

    let parallel = config.parallel && !args.sequential;
    let start = Instant::now();
    let summary = corpus.annotate_with(&Classifier::new(), parallel, || pb.inc(1));
    pb.finish_and_clear();
    let elapsed = start.elapsed();

    corpus
        .write_csv(Path::new(&args.output), &config)
        .map_err(|e| format_error(&format!("Failed to write {}", args.output), &e.to_string()))?;

    log_info(&render_summary(&summary, elapsed.as_secs_f64()), args.quiet);
    log_info(
        &format!("{} wrote {}", color("32", "ok:"), args.output),
        args.quiet,
    );
    Ok(())
}

fn render_summary(summary: &AnnotationSummary, secs: f64) -> String {
    let mut out = format!(
        "Annotated {} rows in {:.2}s: {} flagged, {} candidates",
        summary.rows, secs, summary.flagged_rows, summary.candidates
    );
    let anomalies = summary.zero_count_rows + summary.inconsistent_rows + summary.malformed_rows;
    if anomalies > 0 {
        out.push_str(&format!(
            "\n{} {} rows need review for data problems ({} zero count, {} inconsistent, {} malformed)",
            color("33", "warning:"),
            anomalies,
            summary.zero_count_rows,
            summary.inconsistent_rows,
            summary.malformed_rows
        ));
    }
    out
}
