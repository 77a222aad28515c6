//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; the database path can
//! be overridden through the `FOODBRIDGE_DATABASE` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use foodbridge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analytics::AnalyticsConfig;
use super::database::{DatabaseConfig, DATABASE_ENV};
use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite location and pool settings.
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// Heuristic knobs for `insights`.
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `FOODBRIDGE_DATABASE` override and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path`, falling back to defaults when it does not exist.
    ///
    /// Only appropriate for the implicit default location; an explicitly
    /// requested file that is missing should go through [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is malformed or invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "No config file, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os(DATABASE_ENV).filter(|value| !value.is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.init(verbose);
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value as [`ConfigError::InvalidValue`].
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self
            .database
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }

        let analytics = &self.analytics;
        if analytics.risk_top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "risk_top_n",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analytics.near_expiry_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "near_expiry_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analytics.forecast_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "forecast_window",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if analytics.top_foods == 0 {
            return Err(ConfigError::InvalidValue {
                field: "top_foods",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_takes_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.analytics.near_expiry_days, 7);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse_toml(
            r#"
[analytics]
risk_top_n = 5

[database]
busy_timeout_ms = 100
"#,
        )
        .unwrap();
        assert_eq!(config.analytics.risk_top_n, 5);
        assert_eq!(config.analytics.forecast_window, 3);
        assert_eq!(config.database.busy_timeout_ms, 100);
        assert_eq!(config.database.pool_size, 4);
    }

    #[test]
    fn rejects_zero_pool_size() {
        let result = Config::parse_toml("[database]\npool_size = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "pool_size",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
        ));
    }

    #[test]
    fn rejects_non_positive_windows() {
        let result = Config::parse_toml("[analytics]\nnear_expiry_days = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "near_expiry_days",
                ..
            }))
        ));
        let result = Config::parse_toml("[analytics]\nforecast_window = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_sections() {
        let result = Config::parse_toml("[wallet]\nkey = \"x\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn template_parses() {
        let template = include_str!("../../../config.toml.example");
        let config = Config::parse_toml(template).unwrap();
        assert_eq!(config.analytics.top_foods, 10);
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let path = std::env::temp_dir().join("foodbridge-definitely-missing.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn load_reports_unreadable_file() {
        let path = std::env::temp_dir().join("foodbridge-definitely-missing-2.toml");
        assert!(matches!(
            Config::load(&path),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
