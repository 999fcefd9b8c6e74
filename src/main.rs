//! `depscan` — detect a project's dominant language and list its dependencies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load scan config ([`config::load_config`]).
//! 3. Walk the tree once ([`walk`]) and pick the dominant language ([`detector`]).
//! 4. Locate that language's manifests ([`locator`]) and parse each ([`analyzer`]).
//! 5. Scan source files for imports ([`imports`]).
//! 6. Merge and deduplicate ([`scanner`]), then render ([`report`]).
//! 7. Exit `0`, `1` when no language could be determined, or `2` on an invalid root.

mod analyzer;
mod cli;
mod config;
mod detector;
mod error;
mod imports;
mod locator;
mod models;
mod report;
mod scanner;
mod walk;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::debug;

use cli::{Cli, ReportFormat};
use config::load_config;
use error::ScanError;
use scanner::scan;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let mut config = load_config(&path, cli.config.as_deref())?;
    if cli.no_code {
        config.scan.code_imports = false;
    }
    config.scan.exclude.extend(cli.exclude.iter().cloned());
    debug!("Scan config: {:?}", config.scan);

    let outcome = match scan(&path, &config.scan) {
        Ok(outcome) => outcome,
        Err(err @ ScanError::InvalidRoot { .. }) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(2);
        }
        Err(err) => return Err(err.into()),
    };

    if !cli.quiet {
        for diagnostic in &outcome.diagnostics {
            eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
        }
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&outcome, &path, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        }
    }

    if outcome.report.language.is_none() {
        eprintln!(
            "{} could not detect project language in {}",
            "warning:".yellow().bold(),
            path.display()
        );
        std::process::exit(1);
    }

    Ok(())
}
