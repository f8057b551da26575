//! Validated naming configuration.
//!
//! A [`NamingConfig`] is built once per run through [`NamingConfigBuilder`]
//! and is read-only afterwards. Invalid combinations (description together
//! with hash naming, description without an API key, separators inside a
//! prefix) are rejected by [`NamingConfigBuilder::build`] before any file is
//! touched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jiff::tz::TimeZone;

use crate::error::{RenameError, Result};

/// Default strftime pattern for the timestamp segment.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d";

/// Where the timestamp segment goes, if anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampPosition {
    #[default]
    None,
    Pre,
    Post,
}

impl FromStr for TimestampPosition {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            other => Err(RenameError::invalid_config("timestamp")
                .with_reason(format!("expected 'pre' or 'post', got '{other}'"))),
        }
    }
}

/// Which file time feeds the timestamp segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampSource {
    /// Birth time, falling back to modification time where the platform or
    /// file system does not record one.
    #[default]
    Created,
    Modified,
}

/// How the computed target is produced from the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationKind {
    #[default]
    Rename,
    Symlink,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Rename => write!(f, "rename"),
            OperationKind::Symlink => write!(f, "symlink"),
        }
    }
}

/// Immutable set of naming rules for one run.
#[derive(Clone)]
pub struct NamingConfig {
    resolution: bool,
    timestamp_position: TimestampPosition,
    timestamp_format: String,
    timestamp_source: TimestampSource,
    description: bool,
    hash: bool,
    process_all_extensions: bool,
    output_directory: Option<PathBuf>,
    prefix: Option<String>,
    suffix: Option<String>,
    api_key: Option<String>,
    operation: OperationKind,
}

impl NamingConfig {
    /// Starts a new builder with every rule disabled.
    pub fn builder() -> NamingConfigBuilder {
        NamingConfigBuilder::new()
    }

    pub fn resolution(&self) -> bool {
        self.resolution
    }

    pub fn timestamp_position(&self) -> TimestampPosition {
        self.timestamp_position
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    pub fn timestamp_source(&self) -> TimestampSource {
        self.timestamp_source
    }

    pub fn description(&self) -> bool {
        self.description
    }

    pub fn hash(&self) -> bool {
        self.hash
    }

    pub fn process_all_extensions(&self) -> bool {
        self.process_all_extensions
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    /// True when any rule that only makes sense for images is enabled.
    pub fn has_image_rules(&self) -> bool {
        self.resolution || self.hash || self.description
    }
}

impl fmt::Debug for NamingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingConfig")
            .field("resolution", &self.resolution)
            .field("timestamp_position", &self.timestamp_position)
            .field("timestamp_format", &self.timestamp_format)
            .field("timestamp_source", &self.timestamp_source)
            .field("description", &self.description)
            .field("hash", &self.hash)
            .field("process_all_extensions", &self.process_all_extensions)
            .field("output_directory", &self.output_directory)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("operation", &self.operation)
            .finish()
    }
}

/// Builder for [`NamingConfig`].
#[derive(Debug, Clone, Default)]
pub struct NamingConfigBuilder {
    resolution: bool,
    timestamp_position: TimestampPosition,
    timestamp_format: Option<String>,
    timestamp_source: TimestampSource,
    description: bool,
    hash: bool,
    process_all_extensions: bool,
    output_directory: Option<PathBuf>,
    prefix: Option<String>,
    suffix: Option<String>,
    api_key: Option<String>,
    operation: OperationKind,
}

impl NamingConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, enabled: bool) -> Self {
        self.resolution = enabled;
        self
    }

    pub fn with_timestamp(mut self, position: TimestampPosition) -> Self {
        self.timestamp_position = position;
        self
    }

    /// Sets the strftime pattern; `None` keeps the default.
    pub fn with_timestamp_format(mut self, format: Option<impl Into<String>>) -> Self {
        if let Some(format) = format {
            self.timestamp_format = Some(format.into());
        }
        self
    }

    pub fn with_timestamp_source(mut self, source: TimestampSource) -> Self {
        self.timestamp_source = source;
        self
    }

    pub fn with_description(mut self, enabled: bool) -> Self {
        self.description = enabled;
        self
    }

    pub fn with_hash(mut self, enabled: bool) -> Self {
        self.hash = enabled;
        self
    }

    pub fn with_all_extensions(mut self, enabled: bool) -> Self {
        self.process_all_extensions = enabled;
        self
    }

    pub fn with_output_directory<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.output_directory = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.prefix = prefix.map(Into::into).filter(|p: &String| !p.is_empty());
        self
    }

    pub fn with_suffix(mut self, suffix: Option<impl Into<String>>) -> Self {
        self.suffix = suffix.map(Into::into).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_api_key(mut self, key: Option<impl Into<String>>) -> Self {
        self.api_key = key.map(Into::into);
        self
    }

    pub fn with_operation(mut self, operation: OperationKind) -> Self {
        self.operation = operation;
        self
    }

    /// Validates the combination of rules and freezes it.
    ///
    /// # Errors
    ///
    /// Returns `RenameError::InvalidConfig` when description and hash naming
    /// are both enabled, when description naming has no API key, when a
    /// prefix or suffix contains a path separator, or when the timestamp
    /// format is unusable in a file name.
    pub fn build(self) -> Result<NamingConfig> {
        if self.description && self.hash {
            return Err(RenameError::invalid_config("hash")
                .with_reason("hash naming cannot be combined with description naming"));
        }

        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if self.description && api_key.is_none() {
            return Err(RenameError::invalid_config("api_key")
                .with_reason("description naming requires an API key"));
        }

        if let Some(prefix) = &self.prefix {
            validate_fragment("prefix", prefix)?;
        }
        if let Some(suffix) = &self.suffix {
            validate_fragment("suffix", suffix)?;
        }

        let timestamp_format = self
            .timestamp_format
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string());
        validate_timestamp_format(&timestamp_format)?;

        Ok(NamingConfig {
            resolution: self.resolution,
            timestamp_position: self.timestamp_position,
            timestamp_format,
            timestamp_source: self.timestamp_source,
            description: self.description,
            hash: self.hash,
            process_all_extensions: self.process_all_extensions,
            output_directory: self.output_directory,
            prefix: self.prefix,
            suffix: self.suffix,
            api_key,
            operation: self.operation,
        })
    }
}

fn validate_fragment(field: &str, value: &str) -> Result<()> {
    if value.contains(['/', '\\', '\0']) {
        return Err(RenameError::invalid_config(field)
            .with_reason(format!("'{value}' must not contain path separators")));
    }
    Ok(())
}

fn validate_timestamp_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(RenameError::invalid_config("timestamp_format").with_reason("must not be empty"));
    }

    let sample = jiff::civil::date(2001, 2, 3)
        .at(4, 5, 6, 0)
        .to_zoned(TimeZone::UTC)
        .map_err(|e| RenameError::invalid_config("timestamp_format").with_reason(e.to_string()))?;
    let rendered = jiff::fmt::strtime::format(format, &sample).map_err(|e| {
        RenameError::invalid_config("timestamp_format").with_reason(e.to_string())
    })?;

    if rendered.is_empty() || rendered.contains(['/', '\\', '\0']) {
        return Err(RenameError::invalid_config("timestamp_format")
            .with_reason(format!("'{format}' does not produce a valid file name fragment")));
    }
    Ok(())
}
