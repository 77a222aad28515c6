//! Miette-based diagnostics for configuration files.
//!
//! A TOML parse failure is rendered with the file content and a label on the
//! offending span instead of a bare one-line message.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(foodbridge::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a new configuration diagnostic with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a TOML parse error over `src`.
    ///
    /// Errors without a span point at the start of the file.
    #[must_use]
    pub fn from_toml(error: &toml::de::Error, src: &str) -> Self {
        let (offset, len) = error
            .span()
            .map_or((0, 0), |span| (span.start, span.end.saturating_sub(span.start)));
        Self::new(error.message().to_string(), src, offset, len)
            .with_help("see `foodbridge config init` for a documented template")
    }
}

/// Render a diagnostic in miette's graphical style.
#[must_use]
pub fn render(diagnostic: &ConfigDiagnostic) -> String {
    let mut rendered = String::new();
    let handler = miette::GraphicalReportHandler::new();
    if handler.render_report(&mut rendered, diagnostic).is_err() {
        return diagnostic.to_string();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_points_at_the_bad_value() {
        let src = "[database]\npool_size = \"four\"\n";
        let error = toml::from_str::<crate::infrastructure::config::settings::Config>(src)
            .unwrap_err();

        let diagnostic = ConfigDiagnostic::from_toml(&error, src);
        let offset = diagnostic.span.offset();
        assert!(offset > 0 && offset < src.len());
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn render_includes_message_and_source() {
        let diagnostic = ConfigDiagnostic::new("bad value", "pool_size = 0", 12, 1);
        let rendered = render(&diagnostic);
        assert!(rendered.contains("bad value"));
        assert!(rendered.contains("pool_size"));
    }
}
