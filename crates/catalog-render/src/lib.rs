/*
 * lib.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Batch renderer for demo catalog pages.
//!
//! Walks a catalog laid out as `<root>/<category>/<project>/project.json`,
//! builds one template context per project and writes the rendered page
//! (a detail page or a README) into each project directory.

pub mod config;
pub mod discover;
pub mod metadata;
pub mod render;
pub mod template_context;

pub use config::SiteConfig;
pub use discover::{PROJECT_FILE, ProjectEntry, discover_projects, find_project};
pub use metadata::ProjectMeta;
pub use render::{RenderJob, RenderOutcome, RenderSummary};
pub use template_context::build_context;
