// src/bin/cruisegraph.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cruisegraph_core::cli::{self, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dispatch(&cli)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Dot {
            report,
            view,
            output,
        } => {
            let config = cli::load_config(cli.config.as_deref())?;
            cli::handle_dot(report, view, output.as_ref(), config)
        }
        Commands::Stats { report, view, json } => {
            let config = cli::load_config(cli.config.as_deref())?;
            cli::handle_stats(report, view, *json, config)
        }
        Commands::Highlight { svg, title } => {
            let config = cli::load_config(cli.config.as_deref())?;
            cli::handle_highlight(svg, title, &config)
        }
        Commands::Crumbs { path } => {
            cli::handle_crumbs(path);
            Ok(())
        }
    }
}
