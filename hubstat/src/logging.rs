//! Log output setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing_subscriber::EnvFilter;

/// Resolves the level directive from the `-v` count and the configured level.
///
/// `-v` raises the level to debug and `-vv` to trace; otherwise the
/// configured level applies.
pub fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. `RUST_LOG`, when set, takes precedence.
pub fn init(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_for(verbose, configured)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
