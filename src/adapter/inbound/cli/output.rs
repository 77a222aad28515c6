//! Astral-style CLI output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting), quiet mode, and verbosity levels. Human output uses colored
//! symbols and `tabled` tables; JSON mode prints one object per command.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::result_set::ResultSet;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Force colors on or off; `None` leaves terminal detection in charge.
pub fn set_color(enabled: Option<bool>) {
    match enabled {
        Some(enabled) => owo_colors::set_override(enabled),
        None => owo_colors::unset_override(),
    }
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {:<16} {}",
        label.if_supports_color(Stream::Stdout, |text| text.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |text| text.green()),
        message
    );
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        return;
    }

    println!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stdout, |text| text.yellow()),
        message
    );
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |text| text.red()),
        message
    );
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!();
    println!(
        "{}",
        title.if_supports_color(Stream::Stdout, |text| text.bold())
    );
}

/// Print a note/hint.
pub fn note(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {}",
        message.if_supports_color(Stream::Stdout, |text| text.dimmed())
    );
}

/// Informational "no data" state for an empty section.
pub fn no_data(message: &str) {
    note(&format!("(no data) {message}"));
}

/// Print a hint with "hint:" prefix (Astral-style).
pub fn hint(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!(
        "  {}: {}",
        "hint".if_supports_color(Stream::Stdout, |text| text.cyan()),
        message.if_supports_color(Stream::Stdout, |text| text.dimmed())
    );
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    value
        .if_supports_color(Stream::Stdout, |text| text.cyan())
        .to_string()
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a command's JSON document on stdout.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Serialize `value` as the `payload` of a `command` JSON document.
///
/// # Errors
/// Returns an error if `value` cannot be serialized.
pub fn json_command<T: Serialize>(command: &str, value: &T) -> serde_json::Result<()> {
    json_output(json!({
        "command": command,
        "payload": serde_json::to_value(value)?,
    }));
    Ok(())
}

/// Render a [`ResultSet`] as a terminal table.
#[must_use]
pub fn render_result_set(result: &ResultSet) -> String {
    let mut builder = Builder::default();
    builder.push_record(result.columns.iter().cloned());
    for row in result.display_rows() {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Print a [`ResultSet`] with its row count, or a "no data" note.
pub fn result_set(result: &ResultSet) {
    if result.is_empty() {
        no_data("query returned no rows");
        return;
    }
    lines(&render_result_set(result));
    note(&format!(
        "{} row{}",
        result.len(),
        if result.len() == 1 { "" } else { "s" }
    ));
}

/// Print typed rows as a table, or `empty` as a "no data" note.
pub fn rows<T: Tabled>(rows: &[T], empty: &str) {
    if rows.is_empty() {
        no_data(empty);
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    lines(&table.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn render_result_set_includes_headers_and_null_marker() {
        let mut result = ResultSet::new(vec!["city".into(), "count".into()]);
        result.push_row(vec![Value::String("Pune".into()), Value::Null]);

        let rendered = render_result_set(&result);
        assert!(rendered.contains("city"));
        assert!(rendered.contains("Pune"));
        assert!(rendered.contains("NULL"));
    }

    #[test]
    fn output_config_new_sets_fields() {
        let config = OutputConfig::new(true, false, 2);
        assert!(config.json);
        assert!(!config.quiet);
        assert_eq!(config.verbose, 2);
    }
}
