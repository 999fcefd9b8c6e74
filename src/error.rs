use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan. Per-file failures are recovered as diagnostics instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid root: {} does not exist or is not a directory", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),
}
