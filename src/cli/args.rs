use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ViewConfig;

#[derive(Parser)]
#[command(
    name = "cruisegraph",
    version,
    about = "Navigable Graphviz diagrams from dependency-cruiser reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Config file to use instead of ./cruisegraph.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the filtered, consolidated graph as DOT
    Dot {
        #[arg(value_name = "REPORT")]
        report: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Summarize what the pipeline keeps and merges
    Stats {
        #[arg(value_name = "REPORT")]
        report: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        json: bool,
    },
    /// List the rendered elements highlighted together with TITLE
    Highlight {
        #[arg(value_name = "SVG")]
        svg: PathBuf,
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Show the breadcrumb trail for a start directory
    Crumbs {
        #[arg(value_name = "PATH", default_value = "")]
        path: String,
    },
}

/// View overrides shared by the report commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Only show the subtree under this directory
    #[arg(long, value_name = "DIR")]
    pub start_dir: Option<String>,
    /// Collapse paths to this many segments (0 = off)
    #[arg(long, short, value_name = "N")]
    pub depth: Option<usize>,
    /// Collapse paths to the first match of this regex
    #[arg(long, value_name = "PATTERN", conflicts_with = "depth")]
    pub collapse: Option<String>,
    /// Link every node to BASE/<path>
    #[arg(long, value_name = "BASE")]
    pub base_url: Option<String>,
}

impl ViewArgs {
    /// Layers command-line values over the configured view.
    pub fn apply(&self, view: &mut ViewConfig) {
        if let Some(start_dir) = &self.start_dir {
            view.start_dir.clone_from(start_dir);
        }
        if let Some(depth) = self.depth {
            view.depth = depth;
            view.collapse_pattern = None;
        }
        if let Some(pattern) = &self.collapse {
            view.collapse_pattern = Some(pattern.clone());
        }
        if let Some(base_url) = &self.base_url {
            view.base_url = Some(base_url.clone());
        }
    }
}
