//! The scan pipeline: walk → detect → locate → parse manifests → scan imports → merge.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::analyzer::parse_manifest;
use crate::config::ScanConfig;
use crate::detector::detect_language;
use crate::error::ScanError;
use crate::imports::ImportScanner;
use crate::locator::find_manifests;
use crate::models::{Dependency, Diagnostic, Report};
use crate::walk::collect_files;

/// Everything one scan produced: the report plus what the caller may want to show.
#[derive(Debug)]
pub struct ScanOutcome {
    pub report: Report,
    /// Manifests that were parsed, in discovery order.
    pub manifests: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan the project under `root`.
///
/// Only an invalid root is fatal. When no language can be determined the report
/// has `language: None` and no dependencies.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let (files, mut diagnostics) = collect_files(root, &config.exclude);

    let Some(language) = detect_language(&files) else {
        info!("No recognised source files under {}", root.display());
        return Ok(ScanOutcome {
            report: Report {
                language: None,
                dependencies: Vec::new(),
            },
            manifests: Vec::new(),
            diagnostics,
        });
    };
    info!("Detected language: {}", language);

    let manifests = find_manifests(&files, language);

    // indexed collect keeps discovery order
    let parsed: Vec<(Vec<Dependency>, Option<Diagnostic>)> =
        manifests.par_iter().map(|path| parse_manifest(path)).collect();

    let mut records = Vec::new();
    for (deps, diagnostic) in parsed {
        records.extend(deps);
        diagnostics.extend(diagnostic);
    }
    debug!("Manifests declared {} dependencies", records.len());

    if config.code_imports {
        if let Some(scanner) = ImportScanner::for_language(language)? {
            let (names, scan_diagnostics) = scanner.scan_files(&files);
            let mut names: Vec<String> = names.into_iter().collect();
            names.sort();
            records.extend(names.into_iter().map(Dependency::from_code));
            diagnostics.extend(scan_diagnostics);
        }
    }

    Ok(ScanOutcome {
        report: Report {
            language: Some(language),
            dependencies: dedup(records),
        },
        manifests,
        diagnostics,
    })
}

/// Drop later records whose `(name, source)` was already seen.
pub fn dedup(records: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    records
        .into_iter()
        .filter(|d| seen.insert((d.name.clone(), d.source.clone())))
        .collect()
}
