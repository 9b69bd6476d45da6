/*
 * main.rs
 * Copyright (c) 2025 Little Shock Team
 *
 * Render catalog detail pages or READMEs from project metadata
 */

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_render::{RenderJob, SiteConfig, discover_projects, find_project};
use catalog_template::Template;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "catalog-render")]
#[command(version, about = "Render catalog pages from project.json metadata")]
struct Args {
    /// Catalog root containing <category>/<project>/project.json
    #[arg(value_name = "PROJECTS_DIR")]
    projects_dir: PathBuf,

    /// Template file to render for each project
    #[arg(short = 't', long, value_name = "FILE")]
    template: PathBuf,

    /// File name written inside each project directory
    #[arg(short = 'o', long, default_value = "project-details.html")]
    output_name: String,

    /// Site configuration JSON (status labels, defaults, enum flags)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only render the project with this directory name
    #[arg(short = 'p', long, value_name = "NAME")]
    project: Option<String>,

    /// Fail on directives the context leaves unresolved
    #[arg(long)]
    strict: bool,

    /// Overwrite output files that already exist (by default those projects
    /// are skipped)
    #[arg(short = 'f', long)]
    force: bool,

    /// Print the rendered page to stdout instead of writing files
    /// (requires --project)
    #[arg(long, requires = "project")]
    stdout: bool,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "catalog_render=info",
        1 => "catalog_render=debug,catalog_template=debug",
        _ => "catalog_render=trace,catalog_template=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let template = Template::from_file(&args.template)
        .with_context(|| format!("Failed to load template: {}", args.template.display()))?;
    let site = SiteConfig::load(args.config.as_deref())?;

    let projects = match &args.project {
        Some(name) => {
            let project = find_project(&args.projects_dir, name)?
                .with_context(|| format!("Project not found: {}", name))?;
            vec![project]
        }
        None => discover_projects(&args.projects_dir)?,
    };

    if projects.is_empty() {
        tracing::warn!(root = %args.projects_dir.display(), "No projects found");
        return Ok(());
    }

    let job = RenderJob {
        template: &template,
        site: &site,
        options: site.render_options(args.strict),
        output_name: &args.output_name,
        overwrite: args.force,
        today: chrono::Local::now().date_naive(),
    };

    if args.stdout {
        let rendered = job.render_to_string(&projects[0])?;
        std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let summary = job.render_all(&projects);
    tracing::info!(
        "Processed {} projects: {} succeeded, {} skipped, {} failed",
        summary.total(),
        summary.succeeded,
        summary.skipped,
        summary.failed
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
