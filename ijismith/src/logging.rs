//! Log output for the command line.
//!
//! Logs go to stderr so they never mix with streamed generation output on
//! stdout. `RUST_LOG` replaces the default filter entirely.

use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default.
const WORKSPACE_CRATES: &[&str] = &["ijismith", "ijismith_core", "openrouter"];

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
