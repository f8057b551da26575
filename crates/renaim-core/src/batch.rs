//! Batch driver: screens the input paths, synthesizes a plan for each file
//! in order, applies it (or just records it in a dry run) and reports.
//!
//! Every failure is scoped to its file. The driver records it and carries on
//! with the next input; the caller decides the exit status from the
//! resulting [`BatchSummary`].

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::apply::{apply_plan, AppliedAction};
use crate::config::OperationKind;
use crate::error::{RenameError, Result};
use crate::models::{FileTask, OutputPlan};
use crate::naming::occupied_on_disk;
use crate::probe::is_image_extension;
use crate::synthesizer::Synthesizer;

/// Why an input was passed over without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Symlink,
    Directory,
    NotARegularFile,
    UnsupportedExtension,
    /// Image extension, but the content does not decode as an image.
    NotAnImage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Symlink => write!(f, "symlink"),
            SkipReason::Directory => write!(f, "directory"),
            SkipReason::NotARegularFile => write!(f, "not a regular file"),
            SkipReason::UnsupportedExtension => write!(f, "unsupported extension"),
            SkipReason::NotAnImage => write!(f, "not an image"),
        }
    }
}

/// Result of handling one input path.
#[derive(Debug)]
pub enum FileOutcome {
    Renamed { target: PathBuf },
    Linked { target: PathBuf },
    Unchanged,
    /// Dry run: what would have happened.
    Planned { plan: OutputPlan },
    Skipped(SkipReason),
    Failed(RenameError),
}

/// One line of the batch report.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.outcome, FileOutcome::Skipped(_))
    }
}

/// All reports of a run, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
    pub dry_run: bool,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.is_skip()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed() - self.skipped()
    }

    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(FileReport::is_failure)
    }
}

/// Drives a [`Synthesizer`] over a list of input paths.
pub struct BatchRunner {
    synthesizer: Synthesizer,
    dry_run: bool,
    /// Targets handed out earlier in this run.
    claimed: HashSet<PathBuf>,
    /// Dry run only: sources a real run would already have renamed away.
    vacated: HashSet<PathBuf>,
}

impl BatchRunner {
    pub fn new(synthesizer: Synthesizer) -> Self {
        Self {
            synthesizer,
            dry_run: false,
            claimed: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    /// Plan only; never touch the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Decides whether an input path is processed.
    ///
    /// # Errors
    ///
    /// Returns `RenameError::NotFound` when nothing exists at `path`.
    pub fn screen(&self, path: &Path) -> Result<Option<SkipReason>> {
        let metadata = std::fs::symlink_metadata(path).map_err(|_| RenameError::NotFound {
            path: path.to_path_buf(),
        })?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            return Ok(Some(SkipReason::Symlink));
        }
        if file_type.is_dir() {
            return Ok(Some(SkipReason::Directory));
        }
        if !file_type.is_file() {
            return Ok(Some(SkipReason::NotARegularFile));
        }

        if !self.synthesizer.config().process_all_extensions() {
            let extension = path
                .extension()
                .map(|e| e.to_string_lossy())
                .unwrap_or_default();
            if !is_image_extension(&extension) {
                return Ok(Some(SkipReason::UnsupportedExtension));
            }
        }

        Ok(None)
    }

    /// Handles a single input path end to end.
    pub async fn process_file(&mut self, path: &Path) -> FileReport {
        let outcome = match self.try_process(path).await {
            Ok(outcome) => outcome,
            Err(e) => FileOutcome::Failed(e),
        };

        match &outcome {
            FileOutcome::Skipped(reason) => warn!("skipping {}: {reason}", path.display()),
            FileOutcome::Failed(e) => warn!("{} failed ({}): {e}", path.display(), e.kind()),
            _ => {}
        }

        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    async fn try_process(&mut self, path: &Path) -> Result<FileOutcome> {
        if let Some(reason) = self.screen(path)? {
            return Ok(FileOutcome::Skipped(reason));
        }

        let task = FileTask::from_path(path)?;
        if self.vacated.contains(&task.original_path) {
            return Err(RenameError::NotFound {
                path: task.original_path,
            });
        }
        let claimed = &self.claimed;
        let vacated = &self.vacated;
        let plan = match self
            .synthesizer
            .synthesize(&task, |candidate| {
                claimed.contains(candidate)
                    || (occupied_on_disk(candidate) && !vacated.contains(candidate))
            })
            .await
        {
            Ok(plan) => plan,
            Err(RenameError::NotAnImage { reason, .. }) => {
                debug!("{}: {reason}", path.display());
                return Ok(FileOutcome::Skipped(SkipReason::NotAnImage));
            }
            Err(e) => return Err(e),
        };

        self.claimed.insert(plan.target.clone());

        if self.dry_run {
            if plan.kind == OperationKind::Rename && !plan.is_noop() {
                self.vacated.insert(plan.source.clone());
            }
            return Ok(FileOutcome::Planned { plan });
        }

        Ok(match apply_plan(&plan)? {
            AppliedAction::Renamed => FileOutcome::Renamed {
                target: plan.target,
            },
            AppliedAction::Linked => FileOutcome::Linked {
                target: plan.target,
            },
            AppliedAction::Unchanged => FileOutcome::Unchanged,
        })
    }

    /// Processes `paths` strictly in order, handing each report to
    /// `on_report` as soon as it is ready.
    pub async fn run<I, P>(
        &mut self,
        paths: I,
        mut on_report: impl FnMut(&FileReport),
    ) -> BatchSummary
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<P> = paths.into_iter().collect();
        info!(
            "processing {} input(s){}",
            paths.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        let mut summary = BatchSummary {
            reports: Vec::with_capacity(paths.len()),
            dry_run: self.dry_run,
        };
        for path in &paths {
            let report = self.process_file(path.as_ref()).await;
            on_report(&report);
            summary.reports.push(report);
        }

        info!(
            "done: {} succeeded, {} skipped, {} failed",
            summary.succeeded(),
            summary.skipped(),
            summary.failed()
        );
        summary
    }
}
