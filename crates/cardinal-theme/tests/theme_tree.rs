//! Loading a theme tree from disk and composing it.

use std::io::Write;
use std::path::Path;

use cardinal_theme::{load_commands, Pipeline, StyleLoader, ThemeError};
use tempfile::TempDir;

fn create_file(dir: &Path, relative_path: &str, content: &str) {
    let full_path = dir.join(relative_path);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut file = std::fs::File::create(&full_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn theme_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "clear/src/components/psk-button/psk-button.css", ".btn{}");
    create_file(
        root,
        "clear/src/components/psk-button/psk-button.dark.css",
        ".btn-dark{}",
    );
    create_file(root, "clear/src/components/psk-card/psk-card.css", ".card{}");
    create_file(
        root,
        "citrus/src/components/psk-button/psk-button.dark.css",
        ".citrus-btn-dark{}",
    );
    create_file(
        root,
        "citrus/src/components/psk-badge/psk-badge.css",
        ".citrus-badge{}",
    );
    temp_dir
}

#[test]
fn composes_tree_with_json_config() {
    let temp_dir = theme_tree();
    create_file(
        temp_dir.path(),
        "config.themes.json",
        r#"[
            { "themes": ["clear", "citrus"] },
            { "overridden": { "match": "mode", "type": "intersect" } },
            { "extended": { "match": "component", "type": "difference" } }
        ]"#,
    );

    let loader = StyleLoader::new(temp_dir.path());
    let registry = loader.load_styles().unwrap();
    let commands = loader.load_commands().unwrap();
    let report = Pipeline::new(&registry).run(&commands);

    assert!(report.is_clean());
    let generated = report.state.generated();

    let dark = generated.bucket("psk-button", "dark").unwrap();
    assert_eq!(dark.winner().unwrap().0, "citrus");
    assert_eq!(dark.len(), 1);

    let default = generated.bucket("psk-button", "default").unwrap();
    assert_eq!(default.winner().unwrap().0, "clear");

    let badge = generated.bucket("psk-badge", "default").unwrap();
    assert_eq!(badge.get("citrus").unwrap().code, ".citrus-badge{}");
}

#[test]
fn composes_tree_with_yaml_config() {
    let temp_dir = theme_tree();
    let config = temp_dir.path().join("themes.yaml");
    std::fs::write(
        &config,
        "- themes: [clear, citrus]\n- extended:\n    match: mode\n    type: all\n    components: [psk-button]\n",
    )
    .unwrap();

    let registry = StyleLoader::new(temp_dir.path()).load_styles().unwrap();
    let commands = load_commands(&config).unwrap();
    let report = Pipeline::new(&registry).run(&commands);

    let dark = report.state.generated().bucket("psk-button", "dark").unwrap();
    assert_eq!(dark.max_priority(), 2);
    assert_eq!(dark.get("citrus").unwrap().priority, 2);
    assert!(!report.state.generated().has_component("psk-badge"));
}

#[test]
fn invalid_commands_are_reported_not_fatal() {
    let temp_dir = theme_tree();
    create_file(
        temp_dir.path(),
        "config.themes.json",
        r#"[
            { "themes": ["clear", "nope"] },
            { "themes": ["clear"] },
            { "extended": { "match": "everything", "type": "all" } }
        ]"#,
    );

    let loader = StyleLoader::new(temp_dir.path());
    let registry = loader.load_styles().unwrap();
    let report = Pipeline::new(&registry).run(&loader.load_commands().unwrap());

    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.state.generated().len(), 3);
}

#[test]
fn malformed_config_aborts() {
    let temp_dir = theme_tree();
    create_file(
        temp_dir.path(),
        "config.themes.json",
        r#"[{ "themes": ["clear"], "reset": true }]"#,
    );

    let err = StyleLoader::new(temp_dir.path())
        .load_commands()
        .unwrap_err();
    assert!(matches!(err, ThemeError::MalformedCommandList(_)));
}

#[test]
fn registry_dump_matches_tree() {
    let temp_dir = theme_tree();
    let registry = StyleLoader::new(temp_dir.path()).load_styles().unwrap();

    let value = serde_json::to_value(&registry).unwrap();
    assert_eq!(value["clear"]["psk-card"]["default"], ".card{}");
    assert_eq!(value["citrus"]["psk-button"]["dark"], ".citrus-btn-dark{}");
    assert!(value["citrus"]["psk-button"].get("default").is_none());
}
