//! CLI argument definitions for the key validator.

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "relint",
    version,
    about = "Key and referential-integrity validator for incremental submissions",
    long_about = "Validate an incremental submission against its accepted baseline.\n\n\
                  Checks primary-key uniqueness, foreign-key resolution, and\n\
                  surjectivity across clinical and molecular assay files, and\n\
                  optionally writes a deterministic JSON report."
)]
pub struct Cli {
    /// Directory holding the accepted baseline submission.
    #[arg(value_name = "ORIGINAL_DIR")]
    pub original_dir: PathBuf,

    /// Directory holding the incremental submission under validation.
    #[arg(value_name = "NEW_DIR")]
    pub new_dir: PathBuf,

    /// Deletion list path (default: <NEW_DIR>/to_be_removed.txt when present).
    #[arg(long = "deletions", value_name = "FILE")]
    pub deletions: Option<PathBuf>,

    /// Write the JSON validation report to this file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Rows between progress log lines.
    #[arg(long = "progress-every", value_name = "N")]
    pub progress_every: Option<u64>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}
