//! Tracing/logging initialization.
//!
//! Logs go to stderr so they never interleave with the interactive session
//! on stdout. The filter comes from `--log-level`, then `RUST_LOG`, then
//! defaults to `warn`.

use tracing_subscriber::EnvFilter;

/// Default filter when neither an explicit level nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "warn";

/// Build the log filter from an optional explicit directive
pub fn filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(directive) => {
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(level: Option<&str>, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_explicit_filter_is_used() {
        assert_eq!(filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_invalid_filter_falls_back_to_default() {
        assert_eq!(
            filter(Some("atm_ledger=loudest")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Some("off"), false);
        init(Some("off"), true);
    }
}
