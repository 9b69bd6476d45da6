/*
 * config.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Site-wide configuration.
//!
//! Everything the page generator would otherwise hard-code (status labels,
//! fallback author, enum descriptors) lives here and is loaded from an
//! optional JSON file. Missing fields take the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use catalog_template::{EnumFlags, RenderOptions};
use indexmap::IndexMap;
use serde::Deserialize;

/// Site configuration loaded from `site_config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Display label per project status (`stable`, `beta`, ...).
    pub status_labels: IndexMap<String, String>,

    /// Status assumed when a project does not declare one.
    pub default_status: String,

    /// Author name used when a project has no `author.name`.
    pub default_author: String,

    /// Version used when a project does not declare one.
    pub default_version: String,

    /// Feature list used when a project has no `features` field.
    pub default_features: Vec<String>,

    /// Enum descriptors passed to the renderer.
    pub enum_flags: Vec<EnumFlags>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let status_labels = [("stable", "稳定版"), ("beta", "测试版"), ("deprecated", "已归档")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            status_labels,
            default_status: "beta".to_string(),
            default_author: "Little Shock Team".to_string(),
            default_version: "1.0.0".to_string(),
            default_features: vec!["基本功能".to_string()],
            enum_flags: vec![EnumFlags::new(
                "compatibility.performance_impact",
                ["low", "medium", "high"],
            )],
        }
    }
}

impl SiteConfig {
    /// Load the site configuration, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config: {}", path.display()))?;
        let config: SiteConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid site config: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            statuses = config.status_labels.len(),
            enum_flags = config.enum_flags.len(),
            "Loaded site config"
        );
        Ok(config)
    }

    /// Display label for `status`, falling back to the default status label
    /// and finally to the status itself.
    pub fn status_label(&self, status: &str) -> String {
        self.status_labels
            .get(status)
            .or_else(|| self.status_labels.get(&self.default_status))
            .cloned()
            .unwrap_or_else(|| status.to_string())
    }

    /// Renderer options derived from this configuration.
    pub fn render_options(&self, strict: bool) -> RenderOptions {
        self.enum_flags
            .iter()
            .cloned()
            .fold(RenderOptions::new(), RenderOptions::with_enum_flags)
            .with_strict_mode(strict)
    }
}
