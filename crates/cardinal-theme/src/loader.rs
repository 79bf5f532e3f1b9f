//! Style loading from a theme directory tree.
//!
//! # Directory Structure
//!
//! ```text
//! themes/
//! ├── config.themes.json
//! ├── clear/
//! │   └── src/components/
//! │       ├── button/
//! │       │   ├── button.css         → mode "default"
//! │       │   └── button.dark.css    → mode "dark"
//! │       └── card/
//! │           └── card.css
//! └── citrus/
//!     └── src/components/
//!         └── card/
//!             └── card.high.contrast.css → mode "high.contrast"
//! ```
//!
//! Every visible directory directly under the root is a theme. Its components live in
//! `src/components/<component>/`, one file per mode. A theme directory without
//! a `src/components` folder is registered with no components.
//!
//! # Mode Names
//!
//! The mode is derived from the file name with [`mode_from_file_name`]: the
//! first segment (the component's own name) and the last segment (the
//! extension) are dropped, and whatever is left is joined back with dots.
//!
//! | File | Mode |
//! |------|------|
//! | `button.css` | `default` |
//! | `button.dark.css` | `dark` |
//! | `button.dark.hc.css` | `dark.hc` |
//! | `button..css` | skipped |
//! | `README` | skipped |

use std::path::{Path, PathBuf};

use crate::command::CommandList;
use crate::config::{load_commands, DEFAULT_CONFIG_FILE};
use crate::error::{Result, ThemeError};
use crate::registry::StyleRegistry;

/// Relative path from a theme directory to its component folders.
pub const COMPONENTS_DIR: &[&str] = &["src", "components"];

/// Mode name used for files without a mode segment.
pub const DEFAULT_MODE: &str = "default";

/// Derives the mode name from a style file name.
///
/// Returns `None` for names with no extension at all, for hidden files, and
/// for names with an empty mode segment such as `button..css`.
///
/// # Example
///
/// ```rust
/// use cardinal_theme::mode_from_file_name;
///
/// assert_eq!(mode_from_file_name("button.css").as_deref(), Some("default"));
/// assert_eq!(mode_from_file_name("button.dark.css").as_deref(), Some("dark"));
/// assert_eq!(mode_from_file_name("button.dark.hc.css").as_deref(), Some("dark.hc"));
/// assert_eq!(mode_from_file_name("button"), None);
/// ```
pub fn mode_from_file_name(file_name: &str) -> Option<String> {
    if file_name.starts_with('.') {
        return None;
    }

    let segments: Vec<&str> = file_name.split('.').collect();
    match segments.len() {
        0 | 1 => None,
        2 => Some(DEFAULT_MODE.to_string()),
        n => {
            let inner = &segments[1..n - 1];
            if inner.iter().any(|segment| segment.is_empty()) {
                return None;
            }
            Some(inner.join("."))
        }
    }
}

/// Loads the style registry and command list from a theme root directory.
#[derive(Debug, Clone)]
pub struct StyleLoader {
    root: PathBuf,
}

impl StyleLoader {
    /// Creates a loader for the given theme root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The theme root this loader reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the default command file inside the theme root.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(DEFAULT_CONFIG_FILE)
    }

    /// Walks the theme root and reads every style file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::DirectoryNotFound`] if the root is not a directory,
    /// and [`ThemeError::Io`] if any directory or file cannot be read.
    pub fn load_styles(&self) -> Result<StyleRegistry> {
        if !self.root.is_dir() {
            return Err(ThemeError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let mut registry = StyleRegistry::new();

        for theme_dir in subdirectories(&self.root)? {
            let Some(theme) = dir_name(&theme_dir) else {
                continue;
            };
            registry.add_theme(theme.clone());

            let components_path = COMPONENTS_DIR
                .iter()
                .fold(theme_dir.clone(), |path, segment| path.join(segment));
            if !components_path.is_dir() {
                tracing::debug!(theme = %theme, "theme has no components directory");
                continue;
            }

            for component_dir in subdirectories(&components_path)? {
                let Some(component) = dir_name(&component_dir) else {
                    continue;
                };
                load_component(&mut registry, &theme, &component, &component_dir)?;
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            themes = registry.len(),
            "loaded style registry"
        );
        Ok(registry)
    }

    /// Reads the default command file (`config.themes.json`) from the theme root.
    pub fn load_commands(&self) -> Result<CommandList> {
        load_commands(self.config_path())
    }
}

/// Reads each mode file of one component into the registry.
fn load_component(
    registry: &mut StyleRegistry,
    theme: &str,
    component: &str,
    dir: &Path,
) -> Result<()> {
    for entry in read_dir(dir)? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(mode) = file_name.to_str().and_then(mode_from_file_name) else {
            tracing::debug!(file = %path.display(), "skipping file without a mode");
            continue;
        };

        let bytes = std::fs::read(&path).map_err(|e| io_error(&path, e))?;
        let code = match String::from_utf8(bytes) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(
                    file = %path.display(),
                    "style file is not valid UTF-8, replacing invalid bytes"
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        registry.insert(theme, component, mode, code);
    }
    Ok(())
}

/// Lists the immediate subdirectories of `dir`.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in read_dir(dir)? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn read_dir(dir: &Path) -> Result<std::fs::ReadDir> {
    std::fs::read_dir(dir).map_err(|e| io_error(dir, e))
}

/// Directory name as a theme or component name. Hidden directories are skipped.
fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.starts_with('.'))
        .map(str::to_string)
}

fn io_error(path: &Path, source: std::io::Error) -> ThemeError {
    ThemeError::Io {
        path: path.to_path_buf(),
        source,
    }
}
