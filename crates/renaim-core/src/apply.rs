//! Filesystem side of the pipeline: turning an [`OutputPlan`] into a rename
//! or a symlink.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::config::OperationKind;
use crate::error::{IoResultExt, RenameError, Result};
use crate::models::OutputPlan;
use crate::naming::occupied_on_disk;

/// What [`apply_plan`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedAction {
    Renamed,
    Linked,
    /// The plan renamed a file onto itself; nothing was touched.
    Unchanged,
}

/// Performs the rename or symlink described by `plan`.
///
/// Symlinks point at the absolute source path. Existing entries at the
/// target are never replaced, whatever the operation.
///
/// # Errors
///
/// Returns `RenameError::TargetExists` if something occupies the target
/// (including a dangling symlink), `RenameError::FileSystem` if the
/// underlying call fails.
pub fn apply_plan(plan: &OutputPlan) -> Result<AppliedAction> {
    if plan.is_noop() {
        return Ok(AppliedAction::Unchanged);
    }
    if occupied_on_disk(&plan.target) {
        return Err(RenameError::TargetExists {
            path: plan.target.clone(),
        });
    }

    match plan.kind {
        OperationKind::Rename => {
            fs::rename(&plan.source, &plan.target).fs_context(&plan.source)?;
            debug!("renamed {} -> {}", plan.source.display(), plan.target.display());
            Ok(AppliedAction::Renamed)
        }
        OperationKind::Symlink => {
            create_symlink(&plan.source, &plan.target).fs_context(&plan.target)?;
            debug!("linked {} -> {}", plan.target.display(), plan.source.display());
            Ok(AppliedAction::Linked)
        }
    }
}

/// Resolves `dir` against the working directory, dropping `.` components.
/// Touches nothing on disk.
pub fn absolute_output_directory(dir: &Path) -> Result<PathBuf> {
    let joined = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir().fs_context(dir)?.join(dir)
    };
    Ok(joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect())
}

/// Like [`absolute_output_directory`], then creates the directory (and its
/// parents) if missing.
pub fn prepare_output_directory(dir: &Path) -> Result<PathBuf> {
    let dir = absolute_output_directory(dir)?;
    fs::create_dir_all(&dir).fs_context(&dir)?;
    Ok(dir)
}

#[cfg(unix)]
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_source: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}
