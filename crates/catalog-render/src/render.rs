/*
 * render.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Batch rendering of project pages.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_template::{RenderOptions, Template};
use chrono::NaiveDate;
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::discover::ProjectEntry;
use crate::metadata::ProjectMeta;
use crate::template_context::build_context;

/// Everything shared by the renders of one batch.
#[derive(Debug)]
pub struct RenderJob<'a> {
    pub template: &'a Template,
    pub site: &'a SiteConfig,
    pub options: RenderOptions,
    /// File name written inside each project directory.
    pub output_name: &'a str,
    /// Replace output files that already exist. When unset, those projects
    /// are skipped.
    pub overwrite: bool,
    /// Date used for projects without `last_updated`.
    pub today: NaiveDate,
}

/// What happened to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Written(PathBuf),
    /// The output file already existed and overwriting was not requested.
    Skipped(PathBuf),
}

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RenderSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

impl RenderJob<'_> {
    /// Render one project to a string.
    pub fn render_to_string(&self, project: &ProjectEntry) -> Result<String> {
        let meta = ProjectMeta::load(&project.config_path)?;
        let context = build_context(project, &meta, self.site, self.today);
        self.template
            .render_with_options(&context, &self.options)
            .with_context(|| format!("Failed to render project: {}", project.name))
    }

    /// Render one project and write the page into its directory.
    pub fn render_project(&self, project: &ProjectEntry) -> Result<RenderOutcome> {
        let output_path = project.dir.join(self.output_name);
        if !self.overwrite && output_path.exists() {
            return Ok(RenderOutcome::Skipped(output_path));
        }

        let rendered = self.render_to_string(project)?;
        fs::write(&output_path, rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
        Ok(RenderOutcome::Written(output_path))
    }

    /// Render every project in parallel. Failures are logged and counted; they
    /// do not stop the other renders.
    pub fn render_all(&self, projects: &[ProjectEntry]) -> RenderSummary {
        projects
            .par_iter()
            .map(|project| match self.render_project(project) {
                Ok(RenderOutcome::Written(output_path)) => {
                    tracing::info!(project = %project.name, output = %output_path.display(), "Rendered");
                    RenderSummary {
                        succeeded: 1,
                        ..RenderSummary::default()
                    }
                }
                Ok(RenderOutcome::Skipped(output_path)) => {
                    tracing::warn!(
                        project = %project.name,
                        output = %output_path.display(),
                        "Output exists, skipping (use --force to overwrite)"
                    );
                    RenderSummary {
                        skipped: 1,
                        ..RenderSummary::default()
                    }
                }
                Err(e) => {
                    tracing::error!(project = %project.name, "{:#}", e);
                    RenderSummary {
                        failed: 1,
                        ..RenderSummary::default()
                    }
                }
            })
            .reduce(RenderSummary::default, |a, b| RenderSummary {
                succeeded: a.succeeded + b.succeeded,
                skipped: a.skipped + b.skipped,
                failed: a.failed + b.failed,
            })
    }
}
