//! Status lines for individual files.

use std::fmt;
use std::path::Path;

use crate::batch::{FileOutcome, FileReport};

/// The tag at the start of each status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    Moved,
    Linked,
    Unchanged,
    DryRun,
    Skipped,
    Error,
}

impl StatusTag {
    pub fn for_outcome(outcome: &FileOutcome) -> Self {
        match outcome {
            FileOutcome::Renamed { .. } => StatusTag::Moved,
            FileOutcome::Linked { .. } => StatusTag::Linked,
            FileOutcome::Unchanged => StatusTag::Unchanged,
            FileOutcome::Planned { .. } => StatusTag::DryRun,
            FileOutcome::Skipped(_) => StatusTag::Skipped,
            FileOutcome::Failed(_) => StatusTag::Error,
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            StatusTag::Moved => "mov",
            StatusTag::Linked => "sym",
            StatusTag::Unchanged => "---",
            StatusTag::DryRun => "dry",
            StatusTag::Skipped => "skp",
            StatusTag::Error => "err",
        };
        write!(f, "*** {tag} ***")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Target shown by name alone when it stays next to the source.
fn short_target(source: &Path, target: &Path) -> String {
    if source.parent() == target.parent() {
        file_name(target)
    } else {
        target.display().to_string()
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = StatusTag::for_outcome(&self.outcome);
        match &self.outcome {
            FileOutcome::Renamed { target } => write!(
                f,
                "{tag}: {} -> {}",
                file_name(&self.path),
                short_target(&self.path, target)
            ),
            FileOutcome::Linked { target } => {
                write!(f, "{tag}: {} -> {}", file_name(&self.path), target.display())
            }
            FileOutcome::Unchanged => write!(f, "{tag}: {} unchanged", file_name(&self.path)),
            FileOutcome::Planned { plan } => write!(
                f,
                "{tag}: {} -> {} ({})",
                file_name(&self.path),
                short_target(&plan.source, &plan.target),
                plan.kind
            ),
            FileOutcome::Skipped(reason) => {
                write!(f, "{tag}: {} ({reason})", self.path.display())
            }
            FileOutcome::Failed(e) => write!(f, "{tag}: {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::batch::SkipReason;
    use crate::config::OperationKind;
    use crate::error::RenameError;
    use crate::models::OutputPlan;

    #[test]
    fn test_renamed_line() {
        let report = FileReport {
            path: PathBuf::from("/pics/photo.JPG"),
            outcome: FileOutcome::Renamed {
                target: PathBuf::from("/pics/vac_photo_1024x768.JPG"),
            },
        };
        assert_eq!(
            report.to_string(),
            "*** mov ***: photo.JPG -> vac_photo_1024x768.JPG"
        );
    }

    #[test]
    fn test_renamed_into_other_directory() {
        let report = FileReport {
            path: PathBuf::from("/pics/a.png"),
            outcome: FileOutcome::Renamed {
                target: PathBuf::from("/out/a.png"),
            },
        };
        assert_eq!(report.to_string(), "*** mov ***: a.png -> /out/a.png");
    }

    #[test]
    fn test_linked_line_shows_full_target() {
        let report = FileReport {
            path: PathBuf::from("/pics/a.png"),
            outcome: FileOutcome::Linked {
                target: PathBuf::from("/pics/a_1.png"),
            },
        };
        assert_eq!(report.to_string(), "*** sym ***: a.png -> /pics/a_1.png");
    }

    #[test]
    fn test_dry_run_line() {
        let report = FileReport {
            path: PathBuf::from("/pics/a.png"),
            outcome: FileOutcome::Planned {
                plan: OutputPlan {
                    source: PathBuf::from("/pics/a.png"),
                    target: PathBuf::from("/pics/2023-07-01_a.png"),
                    kind: OperationKind::Rename,
                },
            },
        };
        assert_eq!(
            report.to_string(),
            "*** dry ***: a.png -> 2023-07-01_a.png (rename)"
        );
    }

    #[test]
    fn test_skip_and_error_lines() {
        let skipped = FileReport {
            path: PathBuf::from("notes.txt"),
            outcome: FileOutcome::Skipped(SkipReason::UnsupportedExtension),
        };
        assert_eq!(
            skipped.to_string(),
            "*** skp ***: notes.txt (unsupported extension)"
        );

        let failed = FileReport {
            path: PathBuf::from("gone.png"),
            outcome: FileOutcome::Failed(RenameError::NotFound {
                path: PathBuf::from("gone.png"),
            }),
        };
        assert_eq!(
            failed.to_string(),
            "*** err ***: gone.png: File not found: gone.png"
        );
    }
}
