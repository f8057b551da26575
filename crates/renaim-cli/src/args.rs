//! Command-line arguments and their conversion into core parameters.
//!
//! Flags follow a simple precedence: an explicit flag wins, then the
//! matching environment variable (`OPENAI_API_KEY`, `RENAIM_MODEL`,
//! `RENAIM_ENDPOINT`), then the settings file, then built-in defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use renaim_core::{
    describe::{DEFAULT_ENDPOINT, DEFAULT_MODEL},
    NamingConfig, OpenAiDescriber, OperationKind, Settings, TimestampPosition, TimestampSource,
};

/// Rename files or create symbolic links in bulk
///
/// New names can carry the file's creation date, the pixel resolution of
/// images, an MD5 hash of the content or an AI-generated description, plus a
/// fixed prefix and suffix. Existing files are never overwritten: a taken
/// name gets a numeric suffix (`_1`, `_2`, ...) instead.
#[derive(Parser, Debug)]
#[command(version, about, name = "renaim")]
pub struct Args {
    /// Directory to place processed files in. Defaults to each file's own
    /// directory; created if missing
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// API key for the description service
    #[arg(short = 'k', long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Append the image resolution (`_WIDTHxHEIGHT`) to the name
    #[arg(short, long)]
    pub resolution: bool,

    /// Create symbolic links to the originals instead of renaming them
    #[arg(short, long)]
    pub link: bool,

    /// Put the file's creation date before or after the name
    #[arg(short, long, value_enum)]
    pub timestamp: Option<TimestampArg>,

    /// strftime pattern for the timestamp (default `%Y-%m-%d`)
    #[arg(long, value_name = "FORMAT")]
    pub timestamp_format: Option<String>,

    /// Use the modification time instead of the creation time
    #[arg(long)]
    pub mtime: bool,

    /// Replace the name with an AI-generated description of the image
    #[arg(short, long, conflicts_with = "hash")]
    pub description: bool,

    /// Replace the name with the MD5 hash of the file content
    #[arg(short = 'H', long)]
    pub hash: bool,

    /// Process every file, not only .png/.jpg/.jpeg/.gif
    #[arg(short, long)]
    pub all: bool,

    /// Text placed verbatim in front of the name
    #[arg(short, long, value_name = "TEXT")]
    pub prepend: Option<String>,

    /// Text placed verbatim after the name, before the extension
    #[arg(short = 's', long, value_name = "TEXT")]
    pub append: Option<String>,

    /// Show what would happen without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Vision model used for descriptions
    #[arg(long, env = "RENAIM_MODEL")]
    pub model: Option<String>,

    /// Chat completions endpoint used for descriptions
    #[arg(long, env = "RENAIM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Settings file. Defaults to $XDG_CONFIG_HOME/renaim/config.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long)]
    pub no_color: bool,

    /// Files to process, in order
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Command-line representation of the timestamp position
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TimestampArg {
    /// Before the name
    Pre,
    /// After the name
    Post,
}

impl From<TimestampArg> for TimestampPosition {
    fn from(val: TimestampArg) -> Self {
        match val {
            TimestampArg::Pre => TimestampPosition::Pre,
            TimestampArg::Post => TimestampPosition::Post,
        }
    }
}

impl Args {
    /// Output directory from the flag or the settings file.
    pub fn output_directory(&self, settings: &Settings) -> Option<PathBuf> {
        self.out
            .clone()
            .or_else(|| settings.output_directory.clone())
    }

    /// Builds the validated naming configuration.
    pub fn naming_config(
        &self,
        settings: &Settings,
        output_directory: Option<PathBuf>,
    ) -> renaim_core::Result<NamingConfig> {
        NamingConfig::builder()
            .with_resolution(self.resolution)
            .with_timestamp(self.timestamp.map(Into::into).unwrap_or_default())
            .with_timestamp_format(
                self.timestamp_format
                    .clone()
                    .or_else(|| settings.timestamp_format.clone()),
            )
            .with_timestamp_source(if self.mtime {
                TimestampSource::Modified
            } else {
                TimestampSource::Created
            })
            .with_description(self.description)
            .with_hash(self.hash)
            .with_all_extensions(self.all)
            .with_output_directory(output_directory)
            .with_prefix(self.prepend.clone())
            .with_suffix(self.append.clone())
            .with_api_key(self.api_key.clone().or_else(|| settings.api_key.clone()))
            .with_operation(if self.link {
                OperationKind::Symlink
            } else {
                OperationKind::Rename
            })
            .build()
    }

    /// Description client for the configured endpoint and model.
    pub fn describer(&self, settings: &Settings) -> OpenAiDescriber {
        let endpoint = self
            .endpoint
            .clone()
            .or_else(|| settings.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = self
            .model
            .clone()
            .or_else(|| settings.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        OpenAiDescriber::new(endpoint, model)
    }
}
