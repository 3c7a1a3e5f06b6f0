//! Key validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::info;

use relint_engine::{ValidationConfig, ValidationOutcome, validate_submission, write_report_json};
use relint_ingest::SubmissionLayout;

mod cli;
mod logging;
mod summary;

use crate::cli::Cli;
use crate::logging::{LogConfig, init_logging};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
    });
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    match validate(cli) {
        Ok(outcome) => {
            print_summary(&outcome.report);
            if outcome.is_valid { 0 } else { 1 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            2
        }
    }
}

fn validate(cli: &Cli) -> anyhow::Result<ValidationOutcome> {
    let mut layout = SubmissionLayout::new(&cli.original_dir, &cli.new_dir);
    if let Some(path) = &cli.deletions {
        layout = layout.with_deletion_file(path);
    }
    let mut config = ValidationConfig::new(layout);
    if let Some(every) = cli.progress_every {
        config = config.with_progress_every(every);
    }

    let outcome = validate_submission(&config)?;
    if let Some(path) = &cli.report {
        write_report_json(path, &outcome.report)?;
        info!(path = %path.display(), "wrote validation report");
    }
    Ok(outcome)
}
