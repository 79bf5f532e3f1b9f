//! Command-line arguments.

use std::path::PathBuf;

use cardinal_theme::DEFAULT_CONFIG_FILE;
use clap::{ArgAction, Parser};

/// Build the generated theme styles from a themes directory.
///
/// Reads every `<theme>/src/components/<component>/<file>` under the themes
/// directory, runs the command list from the config file over them, and
/// writes `styles.json` and `styles.generated.json`.
#[derive(Debug, Parser)]
#[command(name = "cardinal-theme", version, about)]
pub struct Args {
    /// Directory holding one folder per theme.
    #[arg(long, value_name = "DIR", default_value = "../themes")]
    pub themes_dir: PathBuf,

    /// Command list file (.json, .yaml or .yml) [default: <THEMES_DIR>/config.themes.json]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write the artifacts [default: <THEMES_DIR>]
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print the generated table to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Exit with a failure status if any command was skipped.
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.themes_dir.join(DEFAULT_CONFIG_FILE))
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| self.themes_dir.clone())
    }
}
