//! Data models for a single file's trip through the synthesizer.
//!
//! A [`FileTask`] is derived from one input path, the synthesizer turns it
//! into an [`OutputPlan`], and the caller applies that plan. None of these
//! outlive the processing of their file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::OperationKind;
use crate::error::{IoResultExt, RenameError, Result};

/// One input file, split into the parts the naming rules work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Absolute path of the input file
    pub original_path: PathBuf,
    /// File name without its final extension
    pub base_name: String,
    /// Final extension without the dot, case preserved. `Some("")` for a
    /// name ending in a dot, `None` when there is no dot
    pub extension: Option<String>,
}

impl FileTask {
    /// Builds a task from an input path.
    ///
    /// Relative paths are resolved against the current working directory so
    /// that symlinks created later point at something stable.
    ///
    /// # Errors
    ///
    /// Returns `RenameError::NotFound` if nothing exists at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let original_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().fs_context(path)?.join(path)
        };

        if std::fs::symlink_metadata(&original_path).is_err() {
            return Err(RenameError::NotFound {
                path: original_path,
            });
        }

        let base_name = original_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| RenameError::NotFound {
                path: original_path.clone(),
            })?;
        let extension = original_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned());

        Ok(Self {
            original_path,
            base_name,
            extension,
        })
    }

    /// Directory containing the input file.
    pub fn directory(&self) -> &Path {
        self.original_path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// The input's file name as it appears on disk.
    pub fn file_name(&self) -> String {
        self.original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything the naming rules may ask about a file, gathered up front.
///
/// Only the facts required by enabled rules are populated.
#[derive(Debug, Clone, Default)]
pub struct FileFacts {
    pub is_image: bool,
    pub timestamp: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub content_hash: Option<String>,
    pub description: Option<String>,
}

/// The computed destination for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: OperationKind,
}

impl OutputPlan {
    /// True for a rename whose target is its own source.
    pub fn is_noop(&self) -> bool {
        self.kind == OperationKind::Rename && self.source == self.target
    }

    /// File name of the target.
    pub fn target_name(&self) -> String {
        self.target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
