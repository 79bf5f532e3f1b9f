//! Writing the composition artifacts.
//!
//! Two files are produced next to each other:
//!
//! | File | Content |
//! |------|---------|
//! | `styles.json` | the full style registry, `theme → component → mode → text` |
//! | `styles.generated.json` | the generated table, `component → mode → bucket` |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardinal_theme::{GeneratedStyles, StyleRegistry};
use serde::Serialize;

pub const STYLES_FILE: &str = "styles.json";
pub const GENERATED_FILE: &str = "styles.generated.json";

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub styles: PathBuf,
    pub generated: PathBuf,
}

/// Serializes a value as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("serializing artifact")?;
    String::from_utf8(buffer).context("artifact is not valid UTF-8")
}

/// Writes `styles.json` and `styles.generated.json` into `dir`.
pub fn write_artifacts(
    dir: &Path,
    registry: &StyleRegistry,
    generated: &GeneratedStyles,
) -> Result<Artifacts> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let artifacts = Artifacts {
        styles: dir.join(STYLES_FILE),
        generated: dir.join(GENERATED_FILE),
    };

    write_json(&artifacts.styles, registry)?;
    write_json(&artifacts.generated, generated)?;
    Ok(artifacts)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_pretty_json(value)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardinal_theme::{CommandList, Pipeline};
    use tempfile::TempDir;

    fn composed() -> (StyleRegistry, GeneratedStyles) {
        let mut registry = StyleRegistry::new();
        registry.insert("clear", "button", "default", "A");
        let commands =
            CommandList::from_value(&serde_json::json!([{ "themes": ["clear"] }])).unwrap();
        let generated = Pipeline::new(&registry).run(&commands).into_generated();
        (registry, generated)
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let json = to_pretty_json(&serde_json::json!({ "a": { "b": 1 } })).unwrap();
        assert_eq!(json, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");
    }

    #[test]
    fn test_write_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let (registry, generated) = composed();

        let artifacts = write_artifacts(&out, &registry, &generated).unwrap();
        assert_eq!(artifacts.styles, out.join("styles.json"));

        let styles: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&artifacts.styles).unwrap()).unwrap();
        assert_eq!(styles["clear"]["button"]["default"], "A");

        let generated: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&artifacts.generated).unwrap())
                .unwrap();
        assert_eq!(generated["button"]["default"]["_max_priority"], 1);
        assert_eq!(generated["button"]["default"]["clear"]["_from"], "themes");
    }
}
