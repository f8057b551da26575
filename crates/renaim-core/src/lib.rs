//! Core library for the renaim bulk renaming tool.
//!
//! This crate turns input files into new names built from a small set of
//! independent rules (file timestamp, pixel resolution, MD5 content hash,
//! AI-generated description, fixed prefix and suffix) and then renames or
//! symlinks them without ever overwriting an existing entry.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │    batch     │    │ synthesizer  │    │    naming    │    │    apply     │
//! │ (screen and  │───▶│ (gather file │───▶│ (segments,   │───▶│ (rename or   │
//! │  iterate)    │    │  facts)      │    │  rules, _N)  │    │  symlink)    │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use renaim_core::{BatchRunner, NamingConfig, Synthesizer, TimestampPosition};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NamingConfig::builder()
//!     .with_resolution(true)
//!     .with_timestamp(TimestampPosition::Pre)
//!     .with_prefix(Some("vac_"))
//!     .build()?;
//!
//! let mut runner = BatchRunner::new(Synthesizer::new(config)).with_dry_run(true);
//! let summary = runner
//!     .run(["photo.JPG", "beach.png"], |report| println!("{report}"))
//!     .await;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod apply;
pub mod batch;
pub mod config;
pub mod describe;
pub mod display;
pub mod error;
pub mod models;
pub mod naming;
pub mod probe;
pub mod settings;
pub mod synthesizer;

// Re-export commonly used types
pub use apply::{apply_plan, AppliedAction};
pub use batch::{BatchRunner, BatchSummary, FileOutcome, FileReport, SkipReason};
pub use config::{
    NamingConfig, NamingConfigBuilder, OperationKind, TimestampPosition, TimestampSource,
};
pub use describe::{Describer, DescribeError, OpenAiDescriber};
pub use error::{RenameError, Result};
pub use models::{Dimensions, FileFacts, FileTask, OutputPlan};
pub use settings::Settings;
pub use synthesizer::Synthesizer;
