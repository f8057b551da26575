//! The name synthesizer: one [`FileTask`] plus the run's [`NamingConfig`]
//! in, one [`OutputPlan`] out.
//!
//! The synthesizer only reads. It gathers the facts the enabled rules need
//! (file time, pixel size, content hash, remote description), runs the rule
//! pipeline over a [`NameSegments`] record, picks the directory and
//! disambiguates against whatever the caller reports as taken. Moving or
//! linking the file is left to [`crate::apply`].

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::config::{NamingConfig, OperationKind, TimestampPosition};
use crate::describe::{sanitize_description, Describer, OpenAiDescriber};
use crate::error::{IoResultExt, RenameError, Result};
use crate::models::{FileFacts, FileTask, OutputPlan};
use crate::naming::{disambiguate, rules_for, NameRule, NameSegments};
use crate::probe::{self, blocking};

/// Computes target paths for files under one naming configuration.
pub struct Synthesizer {
    config: NamingConfig,
    rules: Vec<Box<dyn NameRule>>,
    describer: Arc<dyn Describer>,
}

impl Synthesizer {
    /// Creates a synthesizer that uses the default OpenAI describer.
    pub fn new(config: NamingConfig) -> Self {
        let rules = rules_for(&config);
        Self {
            config,
            rules,
            describer: Arc::new(OpenAiDescriber::default()),
        }
    }

    /// Replaces the description service.
    pub fn with_describer(mut self, describer: Arc<dyn Describer>) -> Self {
        self.describer = describer;
        self
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Whether the file counts as an image for the image-only rules.
    ///
    /// Known image extensions always do. Other files are only inspected
    /// when all extensions are being processed.
    pub async fn is_image(&self, task: &FileTask) -> Result<bool> {
        if task.extension.as_deref().is_some_and(probe::is_image_extension) {
            return Ok(true);
        }
        if !self.config.process_all_extensions() || !self.config.has_image_rules() {
            return Ok(false);
        }
        let path = task.original_path.clone();
        blocking(move || Ok(probe::sniff_image(&path))).await
    }

    /// Collects the facts required by the enabled rules.
    ///
    /// # Errors
    ///
    /// - `RenameError::NotFound` if the file vanished
    /// - `RenameError::MetadataUnavailable` if the timestamp cannot be read
    /// - `RenameError::NotAnImage` if an image-only rule meets a non-image
    ///   and all-extensions mode is off
    /// - `RenameError::DescriptionFailed` if the description service fails
    pub async fn gather_facts(&self, task: &FileTask) -> Result<FileFacts> {
        let path = &task.original_path;
        if std::fs::symlink_metadata(path).is_err() {
            return Err(RenameError::NotFound { path: path.clone() });
        }

        let mut facts = FileFacts::default();

        if self.config.timestamp_position() != TimestampPosition::None {
            let owned = path.clone();
            let source = self.config.timestamp_source();
            let format = self.config.timestamp_format().to_string();
            facts.timestamp =
                Some(blocking(move || probe::fetch_timestamp(&owned, source, &format)).await?);
        }

        if !self.config.has_image_rules() {
            return Ok(facts);
        }

        facts.is_image = self.is_image(task).await?;
        if !facts.is_image {
            if self.config.process_all_extensions() {
                debug!("{}: not an image, image segments omitted", path.display());
                return Ok(facts);
            }
            return Err(RenameError::NotAnImage {
                path: path.clone(),
                reason: format!(
                    "extension '{}' is not a known image type",
                    task.extension.as_deref().unwrap_or_default()
                ),
            });
        }

        if self.config.resolution() {
            let owned = path.clone();
            match blocking(move || probe::read_image_dimensions(&owned)).await {
                Ok(dimensions) => facts.dimensions = Some(dimensions),
                Err(RenameError::NotAnImage { reason, .. })
                    if self.config.process_all_extensions() =>
                {
                    debug!("{}: resolution omitted: {reason}", path.display());
                }
                Err(e) => return Err(e),
            }
        }

        if self.config.hash() {
            let owned = path.clone();
            facts.content_hash = Some(blocking(move || probe::compute_content_hash(&owned)).await?);
        }

        if self.config.description() {
            facts.description = Some(self.fetch_description(path).await?);
        }

        Ok(facts)
    }

    async fn fetch_description(&self, path: &Path) -> Result<String> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| RenameError::description_failed(path, "no API key configured"))?;
        let bytes = tokio::fs::read(path).await.fs_context(path)?;
        let mime = probe::image_mime_type(path);

        let raw = self
            .describer
            .describe(bytes, mime, api_key)
            .await
            .map_err(|e| RenameError::description_failed(path, e.to_string()))?;
        debug!("{}: description service answered {raw:?}", path.display());

        sanitize_description(&raw).ok_or_else(|| {
            RenameError::description_failed(path, "description contained no usable characters")
        })
    }

    /// Runs the rule pipeline over already gathered facts.
    pub fn assemble(&self, task: &FileTask, facts: &FileFacts) -> NameSegments {
        let mut segments = NameSegments::new(&task.base_name, task.extension.as_deref());
        for rule in &self.rules {
            rule.apply(facts, &mut segments);
            debug!("after {}: {}", rule.name(), segments);
        }
        segments
    }

    /// Computes the destination for `task`.
    ///
    /// `is_taken` reports whether a candidate path is unavailable; the
    /// returned target is never one for which it answered `true`. For a
    /// rename the file's own path is not considered taken, so a
    /// configuration that changes nothing maps a file onto itself.
    ///
    /// # Errors
    ///
    /// Any error from [`Synthesizer::gather_facts`], plus
    /// `RenameError::NameCollisionExhausted` when no free name is found.
    pub async fn synthesize(
        &self,
        task: &FileTask,
        is_taken: impl Fn(&Path) -> bool,
    ) -> Result<OutputPlan> {
        let facts = self.gather_facts(task).await?;
        let mut segments = self.assemble(task, &facts);

        let directory = self
            .config
            .output_directory()
            .unwrap_or_else(|| task.directory());
        let kind = self.config.operation();
        let source = &task.original_path;

        let target = disambiguate(&mut segments, directory, |candidate| {
            if kind == OperationKind::Rename && candidate == source.as_path() {
                return false;
            }
            is_taken(candidate)
        })?;

        Ok(OutputPlan {
            source: source.clone(),
            target,
            kind,
        })
    }
}
