// piiscan/src/cli.rs
//! This file defines the command-line interface (CLI) for the piiscan
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "piiscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scan text for exposed PII and report one explainable risk score",
    long_about = "Piiscan is a command-line utility that scans text-based data for exposed Personally Identifiable Information (PII) such as email addresses, phone numbers, and national identification numbers. Each finding is classified against a risk policy and the findings are aggregated into a single bounded 0-100 risk score with a categorical label.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'piiscan' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `piiscan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans files or stdin for PII and prints a scored report.
    #[command(about = "Scans files or stdin for PII and prints a scored risk report.")]
    Scan(ScanCommand),
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Files to scan (reads from stdin if none are given).
    #[arg(value_name = "FILE", help = "Files to scan. Reads from stdin when no files are given.")]
    pub files: Vec<PathBuf>,

    /// Path to a custom risk policy file (YAML), merged over the defaults.
    #[arg(long = "policy", value_name = "FILE", help = "Path to a custom risk policy file (YAML), merged over the built-in defaults.")]
    pub policy: Option<PathBuf>,

    /// Output format for the report.
    #[arg(long = "format", value_enum, default_value = "table", help = "Report output format.")]
    pub format: OutputFormat,

    /// Confidence assigned to findings when context assessment is disabled
    /// or yields nothing.
    #[arg(
        long = "default-confidence",
        value_name = "F",
        default_value_t = 1.0,
        env = "PIISCAN_DEFAULT_CONFIDENCE",
        help = "Confidence in [0,1] assigned to findings without an assessed confidence."
    )]
    pub default_confidence: f64,

    /// Skip the keyword-based context confidence adjustment.
    #[arg(long = "no-context", help = "Treat every finding at full confidence instead of assessing surrounding context.")]
    pub no_context: bool,

    /// Ignore input paths that do not exist instead of failing.
    #[arg(long = "skip-missing", help = "Skip input files that do not exist instead of failing.")]
    pub skip_missing: bool,

    /// Input text encoding.
    #[arg(long = "encoding", value_enum, default_value = "utf8", help = "Input text encoding.")]
    pub encoding: EncodingChoice,

    /// Fail on undecodable input instead of substituting replacement
    /// characters.
    #[arg(long = "strict-decode", help = "Fail on undecodable bytes instead of replacing them.")]
    pub strict_decode: bool,
}

/// Output format for the scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable findings table with a score summary.
    Table,
    /// The full report as a JSON document on stdout.
    Json,
}

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingChoice {
    /// UTF-8 (the default).
    Utf8,
    /// ISO-8859-1, decoded byte-for-byte.
    Latin1,
}
