// Rust guideline compliant 2026-10-19

//! Tracing subscriber setup for the `gear` binary.
//!
//! Logs go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Picks the filter directive for a verbosity level.
///
/// `-v` raises the level to `info` and `-vv` to `debug`; otherwise the
/// configured default applies.
pub fn filter_directive(verbosity: u8, default_filter: &str) -> String {
    match verbosity {
        0 => default_filter.to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Initializes tracing for the process.
///
/// `RUST_LOG` wins over everything else. Safe to call more than once.
pub fn init(verbosity: u8, default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(verbosity, default_filter)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(filter_directive(0, "gearloan_core=debug"), "gearloan_core=debug");
        assert_eq!(filter_directive(1, "warn"), "info");
        assert_eq!(filter_directive(3, "warn"), "debug");
    }
}
