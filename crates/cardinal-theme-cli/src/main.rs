//! `cardinal-theme`: builds the generated theme styles artifact.

mod args;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use cardinal_theme::{load_commands, Pipeline, StyleLoader};
use clap::Parser;

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let loader = StyleLoader::new(&args.themes_dir);
    let registry = loader
        .load_styles()
        .with_context(|| format!("loading themes from {}", args.themes_dir.display()))?;

    let config = args.config_path();
    let commands = load_commands(&config)
        .with_context(|| format!("loading commands from {}", config.display()))?;

    let report = Pipeline::new(&registry).run(&commands);

    if args.stdout {
        println!("{}", output::to_pretty_json(report.state.generated())?);
    } else {
        let artifacts =
            output::write_artifacts(&args.out_dir(), &registry, report.state.generated())?;
        tracing::info!(
            styles = %artifacts.styles.display(),
            generated = %artifacts.generated.display(),
            "wrote theme artifacts"
        );
    }

    if args.strict && !report.is_clean() {
        for skipped in &report.skipped {
            tracing::error!("{skipped}");
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
