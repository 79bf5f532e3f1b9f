//! Error types for the theme composer.
//!
//! There are two families:
//!
//! - [`ThemeError`] aborts a run: a theme tree or config file that cannot be
//!   read, or a command list whose shape leaves the operation order unknown.
//! - [`OptionError`] rejects a single command's payload. The pipeline logs it,
//!   skips the command and carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a composition run.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Reading a file or directory failed.
    #[error("failed to read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The theme root does not exist or is not a directory.
    #[error("theme directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The command file is not valid JSON/YAML.
    #[error("failed to parse config {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The command file extension is not one we know how to parse.
    #[error("unsupported config format for {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedConfigFormat { path: PathBuf },

    /// The command list is not an ordered sequence of single-key records.
    #[error("malformed command list: {0}")]
    MalformedCommandList(String),
}

/// Reasons an operation payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// `overridden`/`extended` payload is not an object.
    #[error("options must be an object")]
    NotAnObject,

    /// A required option is absent.
    #[error("missing required option '{0}'")]
    MissingField(&'static str),

    /// An option holds a value outside its enumerated set.
    #[error("invalid value {value} for option '{field}' (expected one of: {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The payload carries a field the operation does not recognize.
    #[error("unknown option '{0}'")]
    UnknownField(String),

    /// `components` is not a sequence of strings.
    #[error("'components' must be a list of component names")]
    InvalidComponents,

    /// `themes` payload is not a sequence.
    #[error("themes must be a list of theme names")]
    NotASequence,

    /// `themes` payload is an empty sequence.
    #[error("themes list is empty; a base theme is required")]
    EmptyThemes,

    /// `themes` payload contains a non-string entry.
    #[error("theme names must be strings, got {0}")]
    NonStringTheme(String),

    /// A theme name appears twice in the `themes` payload.
    #[error("theme '{0}' is listed more than once")]
    DuplicateTheme(String),

    /// A theme name is not present in the style registry.
    #[error("theme '{0}' does not exist")]
    UnknownTheme(String),
}

/// Result type for theme composer operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = ThemeError::Io {
            path: PathBuf::from("/themes/clear"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/themes/clear"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = OptionError::InvalidValue {
            field: "type",
            value: "\"union\"".to_string(),
            expected: "all, difference, intersect",
        };
        let msg = err.to_string();
        assert!(msg.contains("'type'"));
        assert!(msg.contains("union"));
        assert!(msg.contains("intersect"));
    }

    #[test]
    fn test_malformed_command_list_display() {
        let err = ThemeError::MalformedCommandList("record 2 has no keys".to_string());
        assert_eq!(
            err.to_string(),
            "malformed command list: record 2 has no keys"
        );
    }
}
