/*
 * template.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Loaded template sources.

use std::path::{Path, PathBuf};

use crate::context::TemplateContext;
use crate::error::TemplateResult;
use crate::evaluator;
use crate::options::RenderOptions;

/// A template ready for rendering.
///
/// Templates are plain text; nothing is parsed ahead of time. Keeping the
/// source in one value lets a caller read a template file once and render it
/// for many contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    path: Option<PathBuf>,
}

impl Template {
    /// Create a template from source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    /// Read a template from a file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "Loaded template");
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The file this template was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Render with default options. Never fails.
    pub fn render(&self, context: &TemplateContext) -> String {
        evaluator::render(&self.source, context)
    }

    /// Render with enum descriptors and optional strict mode.
    pub fn render_with_options(
        &self,
        context: &TemplateContext,
        options: &RenderOptions,
    ) -> TemplateResult<String> {
        evaluator::render_with_options(&self.source, context, options)
    }
}
