//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::diagnostic::{self, ConfigDiagnostic};
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "payload": { "path": path.display().to_string() },
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Run: foodbridge config validate {}", path.display()));
    output::note("3. Run: foodbridge init");
    Ok(())
}

/// Execute `config show`.
///
/// `database` is the path after `--db` and `FOODBRIDGE_DATABASE` have been
/// applied, so it may differ from `[database] path`.
pub fn execute_show(config: &Config, source: &Path, database: &Path) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "payload": {
                "source": source.display().to_string(),
                "database_path": database.display().to_string(),
                "config": serde_json::to_value(config)?,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        if source.exists() {
            source.display().to_string()
        } else {
            format!("{} (not found, using defaults)", source.display())
        },
    );

    output::section("Database");
    output::field("Path", output::highlight(database.display()));
    output::field("Pool size", config.database.pool_size);
    output::field("Busy timeout", format!("{}ms", config.database.busy_timeout_ms));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    let analytics = &config.analytics;
    output::section("Analytics");
    output::field("Risk top N", analytics.risk_top_n);
    output::field("Near expiry", format!("{} days", analytics.near_expiry_days));
    output::field("Forecast window", format!("{} months", analytics.forecast_window));
    output::field("Top foods", analytics.top_foods);
    Ok(())
}

/// Execute `config validate`.
///
/// TOML syntax and type errors are rendered as a diagnostic that points at
/// the offending span.
pub fn execute_validate(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
    match Config::parse_toml(&content) {
        Ok(_) => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "config.validate",
                    "payload": { "path": path.display().to_string(), "valid": true },
                }));
                return Ok(());
            }
            output::section("Config Validation");
            output::field("Path", path.display());
            output::success("Config file is valid");
            Ok(())
        }
        Err(Error::Config(ConfigError::Parse(error))) => {
            if !output::is_json() {
                let diagnostic = ConfigDiagnostic::from_toml(&error, &content);
                eprint!("{}", diagnostic::render(&diagnostic));
            }
            Err(ConfigError::Parse(error).into())
        }
        Err(error) => Err(error),
    }
}
