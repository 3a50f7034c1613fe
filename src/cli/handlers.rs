// src/cli/handlers.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::cli::args::ViewArgs;
use crate::config::Config;
use crate::dot;
use crate::highlight::{ElementKind, SvgElements};
use crate::pipeline::{self, scope};
use crate::report::{Module, Report};
use crate::reporting::{self, GraphStats};

/// Loads the config file named on the command line, or the local one.
///
/// # Errors
/// Returns error if the config file is malformed.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn run_pipeline(report_path: &Path, config: &Config) -> Result<(Report, Vec<Module>)> {
    let report = Report::load(report_path)
        .with_context(|| format!("loading {}", report_path.display()))?;
    let options = config.view_options()?;
    let modules = pipeline::optimize(report.modules(), &options)?;
    info!(
        report = %report_path.display(),
        modules = modules.len(),
        "pipeline finished"
    );
    Ok((report, modules))
}

/// Handles the dot command.
///
/// # Errors
/// Returns error if the report, config or output file cannot be processed.
pub fn handle_dot(
    report: &Path,
    view: &ViewArgs,
    output: Option<&PathBuf>,
    mut config: Config,
) -> Result<()> {
    view.apply(&mut config.view);
    let (_, modules) = run_pipeline(report, &config)?;
    let theme = config.theme()?;
    let text = dot::emit(&modules, &theme, &config.emit_options())?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} {} ({} modules)",
                "✓ Wrote".green(),
                path.display(),
                modules.len()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Handles the stats command.
///
/// # Errors
/// Returns error if the report or config cannot be processed.
pub fn handle_stats(report: &Path, view: &ViewArgs, json: bool, mut config: Config) -> Result<()> {
    view.apply(&mut config.view);
    let (loaded, modules) = run_pipeline(report, &config)?;
    let stats = GraphStats::collect(loaded.modules(), &modules);

    if json {
        reporting::print_json(&stats)
    } else {
        reporting::print_stats(&stats, &config.view.start_dir);
        Ok(())
    }
}

/// Handles the highlight command.
///
/// # Errors
/// Returns error if the SVG cannot be read.
pub fn handle_highlight(svg: &Path, title: &str, config: &Config) -> Result<()> {
    let text = fs::read_to_string(svg).with_context(|| format!("reading {}", svg.display()))?;
    let elements = SvgElements::extract(&text)?;

    if let Some(cluster) = elements.cluster(title) {
        let path = scope::cluster_path(&cluster.title).unwrap_or_default();
        println!(
            "{} {} → --start-dir {}",
            "cluster".cyan(),
            cluster.id,
            scope::descend(&config.view.start_dir, path).bold()
        );
        return Ok(());
    }

    let index = elements.index();
    let hits = index.get(title);
    if hits.is_empty() {
        println!("{} no rendered element titled {title:?}", "~".yellow());
        return Ok(());
    }

    for element in hits {
        let kind = match element.kind {
            ElementKind::Node => "node".green(),
            ElementKind::Edge => "edge".blue(),
            ElementKind::Cluster => "cluster".cyan(),
        };
        println!("{kind:>8} {} {}", element.id, element.title.dimmed());
    }
    Ok(())
}

/// Handles the crumbs command.
pub fn handle_crumbs(path: &str) {
    let trail: Vec<String> = scope::breadcrumbs(path)
        .into_iter()
        .map(|crumb| {
            if crumb.current {
                crumb.label.bold().to_string()
            } else {
                format!("{} {}", crumb.label, format!("[{}]", crumb.path).dimmed())
            }
        })
        .collect();
    println!("{}", trail.join(" / "));
}
