// piiscan/src/logger.rs
//! Logger initialization for the CLI binary.
//!
//! Library crates only emit through the `log` facade; this is the single
//! place an `env_logger` backend gets installed. An explicit level wins
//! over `RUST_LOG` so `--quiet` and `--debug` behave predictably.

use log::LevelFilter;

/// Initializes the global logger.
///
/// With `Some(level)` the given filter overrides `RUST_LOG`; with `None`
/// the `RUST_LOG` environment variable applies, defaulting to `info`.
/// Safe to call more than once (later calls are ignored), which keeps
/// tests that construct the CLI repeatedly from panicking.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // Reports go to stdout; logs stay on stderr.
    builder.target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}
