//! Filename assembly.
//!
//! A target name is an ordered record of segments ([`NameSegments`]). Each
//! naming rule ([`NameRule`]) fills in or replaces exactly one slot of that
//! record, so rules can run in any order and adding a rule never moves an
//! existing one. The layout of a rendered name is fixed by
//! [`NameSegments::render`]:
//!
//! ```text
//! [timestamp_] [prefix] stem [_WxH] [suffix] [_timestamp] [_N] [.ext]
//! ```
//!
//! # Example
//!
//! ```rust
//! use renaim_core::naming::NameSegments;
//!
//! let mut segments = NameSegments::new("photo", Some("JPG"));
//! segments.prefix = Some("vac_".to_string());
//! segments.resolution = Some("1024x768".to_string());
//! assert_eq!(segments.render(), "vac_photo_1024x768.JPG");
//! ```

use std::fmt;

use crate::models::FileFacts;

pub mod disambiguate;
pub mod rules;


pub use disambiguate::{disambiguate, occupied_on_disk, MAX_DISAMBIGUATION_ATTEMPTS};
pub use rules::{rules_for, PrefixRule, ResolutionRule, StemReplacement, SuffixRule, TimestampRule};

/// The ordered parts of a target file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSegments {
    pub timestamp_pre: Option<String>,
    pub prefix: Option<String>,
    pub stem: String,
    pub resolution: Option<String>,
    pub suffix: Option<String>,
    pub timestamp_post: Option<String>,
    pub counter: Option<u32>,
    /// Text after the final dot. `Some("")` keeps a trailing dot, `None`
    /// means the name had no dot at all.
    pub extension: Option<String>,
}

impl NameSegments {
    /// Starts from the original stem and extension with nothing added.
    pub fn new(stem: impl Into<String>, extension: Option<&str>) -> Self {
        Self {
            stem: stem.into(),
            extension: extension.map(str::to_string),
            ..Default::default()
        }
    }

    /// Concatenates the segments into a file name.
    pub fn render(&self) -> String {
        let mut name = String::new();

        if let Some(timestamp) = &self.timestamp_pre {
            name.push_str(timestamp);
            name.push('_');
        }
        if let Some(prefix) = &self.prefix {
            name.push_str(prefix);
        }
        name.push_str(&self.stem);
        if let Some(resolution) = &self.resolution {
            name.push('_');
            name.push_str(resolution);
        }
        if let Some(suffix) = &self.suffix {
            name.push_str(suffix);
        }
        if let Some(timestamp) = &self.timestamp_post {
            name.push('_');
            name.push_str(timestamp);
        }
        if let Some(counter) = self.counter {
            name.push('_');
            name.push_str(&counter.to_string());
        }
        if let Some(extension) = &self.extension {
            name.push('.');
            name.push_str(extension);
        }

        name
    }
}

impl fmt::Display for NameSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One independently toggleable contribution to the target name.
pub trait NameRule: fmt::Debug + Send + Sync {
    /// Short identifier used in debug logs.
    fn name(&self) -> &'static str;

    /// Writes this rule's slot. Rules whose fact is missing leave the
    /// segments untouched.
    fn apply(&self, facts: &FileFacts, segments: &mut NameSegments);
}
