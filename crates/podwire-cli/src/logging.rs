//! Log output setup.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
///
/// Without `-v`, `RUST_LOG` wins when set.
pub fn filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber writing to stderr.
///
/// Stdout carries only request lines, so logs never mix with them.
pub fn init(verbose: u8) {
    // A second install is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
