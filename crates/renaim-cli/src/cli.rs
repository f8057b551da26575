//! Batch command handler
//!
//! Glues the core [`BatchRunner`] to the terminal: announces the run,
//! streams one status line per input, renders the summary and maps the
//! outcome to an exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use renaim_core::BatchRunner;

use crate::renderer::TerminalRenderer;

/// Runs one batch and reports it on the terminal
pub struct Cli {
    runner: BatchRunner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(runner: BatchRunner, renderer: TerminalRenderer) -> Self {
        Self { runner, renderer }
    }

    /// Processes `files` in order. Exit status is failure when any file
    /// failed; skipped files do not count.
    pub async fn run(mut self, files: &[PathBuf]) -> Result<ExitCode> {
        let renderer = &self.renderer;
        renderer.line(&format!("*** pre ***: Processing {} files...", files.len()));

        let summary = self
            .runner
            .run(files, |report| renderer.line(&report.to_string()))
            .await;

        renderer.render(&format!("\n{summary}"))?;

        Ok(if summary.has_failures() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }
}
