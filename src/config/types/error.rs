//! Configuration error types.

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::FieldPath;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid config file")]
    Toml(#[from] toml::de::Error),

    // Displayed in full by itself; no source, or the report prints twice.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found while validating the merged configuration.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.field.cyan(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Validation results for every section, reported together.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    entries: Vec<Diagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Error, field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Severity::Error, field, message.into(), Some(hint.into()));
    }

    /// Record a problem that does not stop loading.
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Warning, field, message.into(), None);
    }

    fn push(&mut self, severity: Severity, field: FieldPath, message: String, hint: Option<String>) {
        self.entries.push(Diagnostic {
            severity,
            field,
            message,
            hint,
        });
    }

    pub fn print_warnings(&self) {
        for warning in self.warnings() {
            crate::log!("warning"; "{}: {}", warning.field, warning.message);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// `Err(self)` when any error was recorded; warnings alone pass.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        let noun = if errors.len() == 1 { "error" } else { "errors" };
        write!(
            f,
            "{} ({} {noun})",
            "invalid configuration".red().bold(),
            errors.len()
        )?;
        for error in errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("test.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn test_errors_and_warnings_are_separated() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("feed.title"), "must not be empty");
        diag.warn(FieldPath::new("feed.outputs"), "unsupported extension");
        diag.error_with_hint(FieldPath::new("watch.debounce_ms"), "must be positive", "try 10000");

        assert!(diag.has_errors());
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field.to_string()).collect();
        assert_eq!(fields, vec!["feed.title", "watch.debounce_ms"]);
        assert_eq!(diag.warnings().len(), 1);

        let display = diag.into_result().unwrap_err().to_string();
        assert!(display.contains("2 errors"));
        assert!(display.contains("feed.title"));
        assert!(display.contains("try 10000"));
        assert!(!display.contains("unsupported extension"));
    }

    #[test]
    fn test_warnings_only_is_ok() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("feed.outputs"), "unsupported extension");
        assert!(!diag.has_errors());
        assert!(diag.into_result().is_ok());
    }
}
