//! Renaim CLI Application
//!
//! Renames or symlinks files in bulk, building each new name from the
//! file's timestamp, image resolution, content hash or an AI description.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use log::{debug, info};
use renaim_core::{
    apply::{absolute_output_directory, prepare_output_directory},
    BatchRunner, Settings, Synthesizer,
};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;

    let output_directory = args
        .output_directory(&settings)
        .map(|dir| {
            if args.dry_run {
                absolute_output_directory(&dir)
            } else {
                prepare_output_directory(&dir)
            }
        })
        .transpose()
        .context("Failed to prepare output directory")?;

    let config = args
        .naming_config(&settings, output_directory)
        .context("Invalid naming options")?;
    debug!("naming configuration: {config:?}");

    let describer = args.describer(&settings);
    info!(
        "Renaim started ({} via {})",
        config.operation(),
        describer.endpoint()
    );

    let synthesizer = Synthesizer::new(config).with_describer(Arc::new(describer));
    let runner = BatchRunner::new(synthesizer).with_dry_run(args.dry_run);

    Cli::new(runner, TerminalRenderer::new(!args.no_color))
        .run(&args.files)
        .await
}
