//! The naming rules and their selection from a [`NamingConfig`].

use super::{NameRule, NameSegments};
use crate::config::{NamingConfig, TimestampPosition};
use crate::models::FileFacts;

/// Which generated value replaces the original stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemReplacement {
    Description,
    Hash,
}

impl NameRule for StemReplacement {
    fn name(&self) -> &'static str {
        match self {
            StemReplacement::Description => "description",
            StemReplacement::Hash => "hash",
        }
    }

    fn apply(&self, facts: &FileFacts, segments: &mut NameSegments) {
        let replacement = match self {
            StemReplacement::Description => facts.description.as_ref(),
            StemReplacement::Hash => facts.content_hash.as_ref(),
        };
        if let Some(stem) = replacement {
            segments.stem = stem.clone();
        }
    }
}

/// Places the formatted file time before or after the name.
#[derive(Debug, Clone, Copy)]
pub struct TimestampRule {
    pub position: TimestampPosition,
}

impl NameRule for TimestampRule {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn apply(&self, facts: &FileFacts, segments: &mut NameSegments) {
        let Some(timestamp) = facts.timestamp.clone() else {
            return;
        };
        match self.position {
            TimestampPosition::Pre => segments.timestamp_pre = Some(timestamp),
            TimestampPosition::Post => segments.timestamp_post = Some(timestamp),
            TimestampPosition::None => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrefixRule(pub String);

impl NameRule for PrefixRule {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn apply(&self, _facts: &FileFacts, segments: &mut NameSegments) {
        segments.prefix = Some(self.0.clone());
    }
}

#[derive(Debug, Clone)]
pub struct SuffixRule(pub String);

impl NameRule for SuffixRule {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn apply(&self, _facts: &FileFacts, segments: &mut NameSegments) {
        segments.suffix = Some(self.0.clone());
    }
}

/// Appends `WxH` for images; omitted when the file has no dimensions.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRule;

impl NameRule for ResolutionRule {
    fn name(&self) -> &'static str {
        "resolution"
    }

    fn apply(&self, facts: &FileFacts, segments: &mut NameSegments) {
        if let Some(dimensions) = facts.dimensions {
            segments.resolution = Some(dimensions.to_string());
        }
    }
}

/// Builds the rule list for a configuration.
pub fn rules_for(config: &NamingConfig) -> Vec<Box<dyn NameRule>> {
    let mut rules: Vec<Box<dyn NameRule>> = Vec::new();

    if config.description() {
        rules.push(Box::new(StemReplacement::Description));
    }
    if config.hash() {
        rules.push(Box::new(StemReplacement::Hash));
    }
    if config.timestamp_position() != TimestampPosition::None {
        rules.push(Box::new(TimestampRule {
            position: config.timestamp_position(),
        }));
    }
    if let Some(prefix) = config.prefix() {
        rules.push(Box::new(PrefixRule(prefix.to_string())));
    }
    if config.resolution() {
        rules.push(Box::new(ResolutionRule));
    }
    if let Some(suffix) = config.suffix() {
        rules.push(Box::new(SuffixRule(suffix.to_string())));
    }

    rules
}
