//! Command file loading.
//!
//! The command list lives in a structured file next to the themes, by default
//! `config.themes.json`. JSON and YAML are both accepted; the format is picked
//! from the file extension.
//!
//! ```yaml
//! - themes: [clear, citrus]
//! - extended:
//!     match: component
//!     type: difference
//! - overridden:
//!     match: mode
//!     type: intersect
//!     components: [psk-button]
//! ```
//!
//! Both formats are first read into a [`serde_json::Value`] tree so that
//! payload validation behaves the same regardless of the source format.

use std::path::Path;

use crate::command::CommandList;
use crate::error::{Result, ThemeError};

/// File name of the command list inside a theme root.
pub const DEFAULT_CONFIG_FILE: &str = "config.themes.json";

/// Supported command file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Parses a command list from file content.
///
/// `path` is only used in error messages.
pub fn parse_commands(content: &str, format: ConfigFormat, path: &Path) -> Result<CommandList> {
    let parse_error = |message: String| ThemeError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    let value: serde_json::Value = match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
    };

    CommandList::from_value(&value)
}

/// Reads and parses a command file.
///
/// # Errors
///
/// - [`ThemeError::UnsupportedConfigFormat`] for unknown extensions
/// - [`ThemeError::Io`] if the file cannot be read
/// - [`ThemeError::ConfigParse`] if the content is not valid JSON/YAML
/// - [`ThemeError::MalformedCommandList`] if the content is not a list of
///   single-key operation records
pub fn load_commands(path: impl AsRef<Path>) -> Result<CommandList> {
    let path = path.as_ref();
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ThemeError::UnsupportedConfigFormat {
            path: path.to_path_buf(),
        })?;

    let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let commands = parse_commands(&content, format, path)?;
    tracing::debug!(path = %path.display(), commands = commands.len(), "loaded command list");
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::OperationKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.themes.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("themes.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("themes.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("themes.toml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("themes")), None);
    }

    #[test]
    fn test_parse_yaml_commands() {
        let yaml = r#"
- themes: [clear, citrus]
- extended:
    match: component
    type: difference
- reset:
"#;
        let commands =
            parse_commands(yaml, ConfigFormat::Yaml, &PathBuf::from("t.yaml")).unwrap();
        let kinds: Vec<OperationKind> = commands.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Themes,
                OperationKind::Extend,
                OperationKind::Reset
            ]
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_commands("[{", ConfigFormat::Json, &PathBuf::from("c.json")).unwrap_err();
        assert!(matches!(err, ThemeError::ConfigParse { .. }));
        assert!(err.to_string().contains("c.json"));
    }

    #[test]
    fn test_load_commands_unsupported_extension() {
        let err = load_commands("themes.toml").unwrap_err();
        assert!(matches!(err, ThemeError::UnsupportedConfigFormat { .. }));
    }

    #[test]
    fn test_load_commands_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_commands(temp_dir.path().join("config.themes.json")).unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn test_load_commands_malformed_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.themes.json");
        std::fs::write(&path, r#"{"themes": ["clear"]}"#).unwrap();

        let err = load_commands(&path).unwrap_err();
        assert!(matches!(err, ThemeError::MalformedCommandList(_)));
    }
}
