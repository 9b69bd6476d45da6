/*
 * discover.rs
 * Copyright (c) 2025 Little Shock Team
 */

//! Project discovery.
//!
//! The catalog is laid out as `<root>/<category>/<project>/project.json`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

/// Metadata file that marks a directory as a project.
pub const PROJECT_FILE: &str = "project.json";

/// A project found under the catalog root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Project directory name.
    pub name: String,
    /// Project directory.
    pub dir: PathBuf,
    /// Path to `project.json`.
    pub config_path: PathBuf,
    /// Category directory name.
    pub category: String,
}

impl ProjectEntry {
    fn from_config_path(config_path: &Path) -> Option<Self> {
        let dir = config_path.parent()?;
        let name = dir.file_name()?.to_string_lossy().into_owned();
        let category = dir.parent()?.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            name,
            dir: dir.to_path_buf(),
            config_path: config_path.to_path_buf(),
            category,
        })
    }
}

/// Find every project under `root`, sorted by path.
pub fn discover_projects(root: &Path) -> Result<Vec<ProjectEntry>> {
    if !root.is_dir() {
        anyhow::bail!("Projects directory does not exist: {}", root.display());
    }

    let projects: Vec<ProjectEntry> = WalkDir::new(root)
        .min_depth(3)
        .max_depth(3)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == PROJECT_FILE)
        .filter_map(|e| ProjectEntry::from_config_path(e.path()))
        .collect();

    tracing::debug!(root = %root.display(), count = projects.len(), "Discovered projects");
    Ok(projects)
}

/// Find a single project by directory name, in any category.
pub fn find_project(root: &Path, name: &str) -> Result<Option<ProjectEntry>> {
    Ok(discover_projects(root)?
        .into_iter()
        .find(|project| project.name == name))
}
