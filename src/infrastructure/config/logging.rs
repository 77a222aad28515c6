//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Accepted values for `[logging] format`.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Filter directive after applying `-v` flags.
    ///
    /// Each `-v` raises the floor: one gives `info`, two or more `debug`.
    /// A configured level that is already more verbose is kept.
    #[must_use]
    pub fn effective_level(&self, verbose: u8) -> String {
        let floor = match verbose {
            0 => return self.level.clone(),
            1 => "info",
            _ => "debug",
        };
        if rank(&self.level) > rank(floor) {
            self.level.clone()
        } else {
            floor.to_string()
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
    /// overrides the configured level.
    pub fn init(&self, verbose: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbose)));

        // A second initialization (e.g. in tests) keeps the first subscriber.
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

fn rank(level: &str) -> u8 {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => 5,
        "debug" => 4,
        "info" => 3,
        "warn" => 2,
        "error" => 1,
        _ => 0,
    }
}
