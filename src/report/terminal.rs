use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Dependency, CODE_SOURCE};
use crate::scanner::ScanOutcome;

/// Render a colored terminal report.
pub fn render(outcome: &ScanOutcome, path: &Path, verbose: bool, quiet: bool) -> Result<()> {
    let deps = &outcome.report.dependencies;
    let language = outcome
        .report
        .language
        .map(|l| l.to_string())
        .unwrap_or_else(|| "undetermined".to_string());
    let code_count = deps.iter().filter(|d| d.source == CODE_SOURCE).count();
    let manifest_count = deps.len() - code_count;

    if quiet {
        println!(
            "Language: {}  Total: {}  Manifest: {}  Code: {}",
            language,
            deps.len(),
            manifest_count.to_string().cyan(),
            code_count.to_string().magenta(),
        );
        return Ok(());
    }

    println!("\n {} v{}", "depscan".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Language           : {}", language));
    println!(" │  {:<48} │", format!("Manifests parsed   : {}", outcome.manifests.len()));
    println!(" │  {:<48} │", format!("Declared (manifest): {}", manifest_count));
    println!(" │  {:<48} │", format!("Imported (code)    : {}", code_count));
    println!(" │  {:<48} │", format!("Diagnostics        : {}", outcome.diagnostics.len()));
    println!(" └────────────────────────────────────────────────────┘\n");

    if verbose && !outcome.manifests.is_empty() {
        println!(" {} Manifests:\n", "[INFO]".cyan().bold());
        for manifest in &outcome.manifests {
            let shown = manifest.strip_prefix(path).unwrap_or(manifest);
            println!("   {}", shown.display());
        }
        println!();
    }

    if !deps.is_empty() {
        render_table(deps);
        println!();
    }

    Ok(())
}

fn render_table(deps: &[Dependency]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for dep in deps {
        let version = match &dep.version {
            Some(v) => Cell::new(v),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        let source_color = if dep.source == CODE_SOURCE {
            Color::Magenta
        } else {
            Color::Cyan
        };

        table.add_row(vec![
            Cell::new(&dep.name),
            version,
            Cell::new(&dep.source).fg(source_color),
        ]);
    }

    println!("{}", table);
}
