//! Cardinal Theme - composes component styles from multiple named themes.
//!
//! A theme directory holds one folder per theme, and each theme provides style
//! text per component and per mode. A small command list decides how those
//! themes are layered into a single generated table:
//!
//! - `themes`: select the active themes and seed the table from the first one
//! - `overridden`: replace locations with a tail theme's style
//! - `extended`: add a tail theme's style as a ranked, higher-priority contributor
//! - `reset`: clear the generated table
//!
//! # Quick Start
//!
//! ```rust
//! use cardinal_theme::{CommandList, Pipeline, StyleRegistry};
//! use serde_json::json;
//!
//! let mut registry = StyleRegistry::new();
//! registry.insert("clear", "button", "default", "A");
//! registry.insert("citrus", "button", "default", "B");
//! registry.insert("citrus", "card", "default", "C");
//!
//! let commands = CommandList::from_value(&json!([
//!     { "themes": ["clear", "citrus"] },
//!     { "extended": { "match": "component", "type": "difference" } }
//! ]))
//! .unwrap();
//!
//! let report = Pipeline::new(&registry).run(&commands);
//! let generated = report.state.generated();
//!
//! let button = generated.bucket("button", "default").unwrap();
//! assert_eq!(button.winner().unwrap().0, "clear");
//!
//! let card = generated.bucket("card", "default").unwrap();
//! assert_eq!(card.winner().unwrap().0, "citrus");
//! ```
//!
//! # Selection Semantics
//!
//! `overridden` and `extended` take the same options:
//!
//! | Option | Values | Meaning |
//! |--------|--------|---------|
//! | `match` | `component`, `mode` | granularity at which locations are tested and written |
//! | `type` | `all`, `intersect`, `difference` | which locations of the tail themes take part |
//! | `components` | list of names (optional) | restricts the candidate components |
//!
//! `intersect` only touches locations already present in the table, and
//! `difference` only touches locations that were absent when the operation
//! started.
//!
//! # Priorities
//!
//! Each (component, mode) location holds a [`ContributionBucket`]. Priorities
//! within a bucket are always `1..=max_priority` with no gaps; the record with
//! the highest priority is the one consumers should apply.

mod command;
mod config;
mod error;
mod executor;
mod loader;
mod options;
mod pipeline;
mod registry;
mod state;

// Re-export public API
pub use command::{Command, CommandList, OperationKind};
pub use config::{load_commands, parse_commands, ConfigFormat, DEFAULT_CONFIG_FILE};
pub use error::{OptionError, Result, ThemeError};
pub use executor::{apply_extend, apply_override, apply_reset, apply_themes};
pub use loader::{mode_from_file_name, StyleLoader, COMPONENTS_DIR, DEFAULT_MODE};
pub use options::{validate_themes, MatchOn, MergeOptions, SetKind};
pub use pipeline::{Operation, Pipeline, RunReport, SkippedCommand};
pub use registry::{ComponentStyles, StyleRegistry, ThemeStyles};
pub use state::{
    CompositionState, ContributionBucket, ContributionRecord, GeneratedStyles, ModeBuckets, Origin,
};
