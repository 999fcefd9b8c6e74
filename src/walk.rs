use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::{debug, trace, warn};

use crate::models::Diagnostic;

/// Collect every regular file below `root` in a stable, name-sorted order.
///
/// No ignore files, hidden-file rules or VCS filters are applied. The only
/// filtering is `exclude`, a list of directory names skipped wherever they occur.
/// Entries that cannot be read are reported and skipped.
pub fn collect_files(root: &Path, exclude: &[String]) -> (Vec<PathBuf>, Vec<Diagnostic>) {
    debug!("Walking directory tree from root: {}", root.display());
    let excluded = exclude.to_vec();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if entry.depth() == 0 || !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !excluded.iter().any(|e| *e == name)
        })
        .build();

    let mut files = Vec::new();
    let mut diagnostics = Vec::new();

    for res in walker {
        match res {
            Ok(entry) => {
                if entry.file_type().is_some_and(|t| t.is_file()) {
                    trace!("Found file: {}", entry.path().display());
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err_path(&err).unwrap_or_else(|| root.to_path_buf());
                warn!("Skipping unreadable entry {}: {}", path.display(), err);
                diagnostics.push(Diagnostic::new(path, err));
            }
        }
    }

    debug!("Collected {} files", files.len());
    (files, diagnostics)
}

fn err_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            err_path(err)
        }
        _ => None,
    }
}
