//! Error types for the renaim library.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for everything that can go wrong while planning or applying a
/// rename.
///
/// Apart from [`RenameError::InvalidConfig`] and [`RenameError::Settings`],
/// every variant is scoped to a single file: the batch driver records it and
/// moves on to the next input.
#[derive(Error, Debug)]
pub enum RenameError {
    /// Input file does not exist or cannot be reached
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },
    /// An image-only rule was applied to something that is not an image
    #[error("Not an image: {path}: {reason}")]
    NotAnImage { path: PathBuf, reason: String },
    /// Creation or modification time could not be read
    #[error("Timestamp unavailable for '{path}': {source}")]
    MetadataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The remote description service failed or returned nothing usable
    #[error("Description failed for '{path}': {reason}")]
    DescriptionFailed { path: PathBuf, reason: String },
    /// Every numbered variant of the target name is already taken
    #[error("No free name for '{path}' after {attempts} attempts")]
    NameCollisionExhausted { path: PathBuf, attempts: u32 },
    /// The target appeared on disk between planning and applying
    #[error("Target already exists: {path}")]
    TargetExists { path: PathBuf },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid naming configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
    /// Settings file could not be read or parsed
    #[error("Settings error in '{path}': {message}")]
    Settings { path: PathBuf, message: String },
    /// A blocking probe task panicked or was cancelled
    #[error("Background task failed: {message}")]
    Task { message: String },
}

/// Builder for creating configuration validation errors.
pub struct InvalidConfigBuilder {
    field: String,
}

impl InvalidConfigBuilder {
    /// Create a new invalid configuration error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RenameError {
        RenameError::InvalidConfig {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RenameError {
    /// Creates a builder for configuration validation errors.
    pub fn invalid_config(field: impl Into<String>) -> InvalidConfigBuilder {
        InvalidConfigBuilder::new(field)
    }

    /// Shorthand for a description failure with a formatted reason.
    pub fn description_failed(path: &Path, reason: impl Into<String>) -> Self {
        Self::DescriptionFailed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly label used in status lines and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::NotAnImage { .. } => "not-an-image",
            Self::MetadataUnavailable { .. } => "metadata-unavailable",
            Self::DescriptionFailed { .. } => "description-failed",
            Self::NameCollisionExhausted { .. } => "collision-exhausted",
            Self::TargetExists { .. } => "target-exists",
            Self::FileSystem { .. } => "file-system",
            Self::InvalidConfig { .. } => "invalid-config",
            Self::Settings { .. } => "settings",
            Self::Task { .. } => "task",
        }
    }
}

/// Extension trait attaching a path to `std::io::Error` results.
pub trait IoResultExt<T> {
    /// Map I/O errors into [`RenameError::FileSystem`] for `path`.
    fn fs_context(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| RenameError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for renaim operations
pub type Result<T> = std::result::Result<T, RenameError>;
