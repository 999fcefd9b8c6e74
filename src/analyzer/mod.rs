//! Manifest parsers, one module per ecosystem.
//!
//! Each parser is registered under the exact manifest filename it understands
//! in [`PARSERS`]. Parsers push records into the caller's buffer as they go, so a
//! parser that fails halfway still leaves its earlier records in place.

use std::path::Path;

use anyhow::Result;
use log::{trace, warn};

use crate::models::{Dependency, Diagnostic};

pub mod go;
pub mod java;
pub mod node;
pub mod python;
pub mod ruby;
pub mod rust;

/// Parse `content` and append records tagged with `source`.
pub type ParseFn = fn(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()>;

pub struct ManifestParser {
    pub filename: &'static str,
    pub parse: ParseFn,
}

pub const PARSERS: &[ManifestParser] = &[
    ManifestParser {
        filename: "requirements.txt",
        parse: python::parse_requirements_txt,
    },
    ManifestParser {
        filename: "pyproject.toml",
        parse: python::parse_pyproject_toml,
    },
    ManifestParser {
        filename: "Pipfile",
        parse: python::parse_pipfile,
    },
    ManifestParser {
        filename: "package.json",
        parse: node::parse_package_json,
    },
    ManifestParser {
        filename: "yarn.lock",
        parse: node::parse_yarn_lock,
    },
    ManifestParser {
        filename: "pom.xml",
        parse: java::parse_pom_xml,
    },
    ManifestParser {
        filename: "build.gradle",
        parse: java::parse_build_gradle,
    },
    ManifestParser {
        filename: "build.gradle.kts",
        parse: java::parse_build_gradle,
    },
    ManifestParser {
        filename: "Gemfile",
        parse: ruby::parse_gemfile,
    },
    ManifestParser {
        filename: "Gemfile.lock",
        parse: ruby::parse_gemfile_lock,
    },
    ManifestParser {
        filename: "go.mod",
        parse: go::parse_go_mod,
    },
    ManifestParser {
        filename: "Cargo.toml",
        parse: rust::parse_cargo_toml,
    },
];

pub fn parser_for(filename: &str) -> Option<&'static ManifestParser> {
    PARSERS.iter().find(|p| p.filename == filename)
}

/// Parse one manifest file. Never fails: read and format errors become a
/// [`Diagnostic`] and the file keeps whatever records it produced before failing.
pub fn parse_manifest(path: &Path) -> (Vec<Dependency>, Option<Diagnostic>) {
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return (Vec::new(), None);
    };
    let Some(parser) = parser_for(filename) else {
        trace!("No parser registered for {}", path.display());
        return (Vec::new(), None);
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            return (Vec::new(), Some(Diagnostic::new(path, format!("failed to read: {err}"))));
        }
    };

    let mut deps = Vec::new();
    let diagnostic = match (parser.parse)(&content, parser.filename, &mut deps) {
        Ok(()) => None,
        Err(err) => {
            warn!("Failed to parse {}: {:#}", path.display(), err);
            Some(Diagnostic::new(path, format!("failed to parse: {err:#}")))
        }
    };

    trace!("{} declared {} dependencies", path.display(), deps.len());
    (deps, diagnostic)
}
