//! Log subscriber setup
//!
//! Output goes to stderr so the terminal UI on stdout stays clean.
//! `RUST_LOG` wins over the configured level when it is set.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Build the filter: `RUST_LOG` if set, otherwise `level`.
pub fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: &str, json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::Config(format!("Failed to install log subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(filter("debug").is_ok());
        assert!(filter("craps_table=trace,warn").is_ok());
    }
}
