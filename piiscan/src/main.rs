// piiscan/src/main.rs
//! piiscan entry point.
//!
//! Parses the CLI, installs the logger, and dispatches to the command
//! runners in `piiscan::commands`.

use anyhow::Result;
use clap::Parser;

use piiscan::cli::{Cli, Commands};
use piiscan::commands::scan;
use piiscan::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::Scan(cmd) => scan::run(&cmd, args.quiet),
    }
}
