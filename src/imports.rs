//! Code-level dependency discovery.
//!
//! Each supported language gets an [`ImportScanner`]: a set of patterns that pull
//! raw module references out of source text, plus the separators used to cut
//! each reference down to its top-level segment (`os.path` → `os`,
//! `serde::Deserialize` → `serde`, `lodash/fp` → `lodash`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use rayon::prelude::*;
use regex::Regex;

use crate::models::{Diagnostic, Language};

/// Leading segment of `token` before the first of `separators`.
pub fn top_level_segment<'a>(token: &'a str, separators: &[&str]) -> &'a str {
    separators
        .iter()
        .filter_map(|sep| token.find(sep))
        .min()
        .map_or(token, |idx| &token[..idx])
}

enum Patterns {
    /// Every participating capture group of every match is a reference.
    /// Captures may hold comma-separated lists with aliases (`import numpy as np, os`).
    Captures(Vec<Regex>),
    /// Go `import "x"`, `import alias "x"` and `import ( ... )` blocks.
    Go { quoted: Regex },
    /// Java `package` and `import [static]` declarations.
    Java { package: Regex, import: Regex },
}

pub struct ImportScanner {
    language: Language,
    extensions: &'static [&'static str],
    separators: &'static [&'static str],
    patterns: Patterns,
}

impl ImportScanner {
    /// Build the scanner for `language`, or `None` if it has no import grammar.
    pub fn for_language(language: Language) -> Result<Option<Self>, regex::Error> {
        let scanner = match language {
            Language::Python => ImportScanner {
                language,
                extensions: &["py"],
                separators: &["."],
                patterns: Patterns::Captures(vec![
                    Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import\b")?,
                    Regex::new(
                        r"(?m)^\s*import\s+([\w.]+(?:\s+as\s+\w+)?(?:\s*,\s*[\w.]+(?:\s+as\s+\w+)?)*)",
                    )?,
                ]),
            },
            Language::JavaScript | Language::TypeScript => ImportScanner {
                language,
                extensions: &["js", "jsx", "ts", "tsx"],
                separators: &["/"],
                patterns: Patterns::Captures(vec![Regex::new(
                    r#"require\(\s*['"]([^'"]+)['"]\s*\)|from\s+['"]([^'"]+)['"]|import\s*\(?\s*['"]([^'"]+)['"]"#,
                )?]),
            },
            Language::Go => ImportScanner {
                language,
                extensions: &["go"],
                separators: &["/"],
                patterns: Patterns::Go {
                    quoted: Regex::new(r#""([^"]+)""#)?,
                },
            },
            Language::Rust => ImportScanner {
                language,
                extensions: &["rs"],
                separators: &["::"],
                patterns: Patterns::Captures(vec![
                    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+(?:::)?([\w:]+)")?,
                    Regex::new(r"(?m)^\s*extern\s+crate\s+(\w+)")?,
                ]),
            },
            Language::Ruby => ImportScanner {
                language,
                extensions: &["rb"],
                separators: &["/"],
                patterns: Patterns::Captures(vec![Regex::new(
                    r#"(?m)^\s*(?:require|require_relative)\s+['"]([^'"]+)['"]"#,
                )?]),
            },
            Language::Java => ImportScanner {
                language,
                extensions: &["java"],
                separators: &["."],
                patterns: Patterns::Java {
                    package: Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;")?,
                    import: Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([\w.*]+)\s*;")?,
                },
            },
            Language::C | Language::Cpp | Language::Php => return Ok(None),
        };
        Ok(Some(scanner))
    }

    /// Whether `path` is a source file this scanner reads.
    pub fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_ascii_lowercase().as_str()))
    }

    /// Raw module references in `content`, before normalisation.
    fn references<'a>(&self, content: &'a str) -> Vec<&'a str> {
        match &self.patterns {
            Patterns::Captures(regexes) => regexes
                .iter()
                .flat_map(|re| re.captures_iter(content))
                .flat_map(|caps| {
                    caps.iter()
                        .skip(1)
                        .flatten()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                })
                .flat_map(|list| list.split(','))
                // `numpy as np` → `numpy`
                .filter_map(|item| item.split_whitespace().next())
                .collect(),
            Patterns::Go { quoted } => go_imports(content, quoted),
            Patterns::Java { package, import } => {
                if let Some(caps) = package.captures(content) {
                    trace!("Java package {}", &caps[1]);
                }
                import
                    .captures_iter(content)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| m.as_str())
                    // a bare class name lives in the default package
                    .filter(|class| class.contains('.'))
                    .collect()
            }
        }
    }

    /// Top-level dependency names referenced by `content`.
    pub fn scan_source(&self, content: &str) -> HashSet<String> {
        self.references(content)
            .into_iter()
            .map(|r| top_level_segment(r, self.separators))
            // relative paths (`./x`, `../x`) leave only dots behind
            .filter(|name| !name.is_empty() && !name.chars().all(|c| c == '.'))
            .map(str::to_string)
            .collect()
    }

    /// Scan every handled file in `files`. Unreadable files become diagnostics.
    pub fn scan_files(&self, files: &[PathBuf]) -> (HashSet<String>, Vec<Diagnostic>) {
        let results: Vec<Result<HashSet<String>, Diagnostic>> = files
            .par_iter()
            .filter(|p| self.handles(p))
            .map(|path| match std::fs::read_to_string(path) {
                Ok(content) => {
                    trace!("Scanning imports in {}", path.display());
                    Ok(self.scan_source(&content))
                }
                Err(err) => {
                    warn!("Failed to read {}: {}", path.display(), err);
                    Err(Diagnostic::new(path, format!("failed to read: {err}")))
                }
            })
            .collect();

        let mut names = HashSet::new();
        let mut diagnostics = Vec::new();
        for result in results {
            match result {
                Ok(found) => names.extend(found),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        debug!("Found {} distinct {} imports", names.len(), self.language);
        (names, diagnostics)
    }
}

fn go_imports<'a>(content: &'a str, quoted: &Regex) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut in_block = false;

    for line in content.lines() {
        // import paths never contain `//`
        let line = line.split("//").next().unwrap_or(line).trim();

        let body = if in_block {
            line
        } else {
            let Some(rest) = line.strip_prefix("import") else {
                continue;
            };
            // `importPath := ...` is an identifier, not the keyword
            if !rest.starts_with(|c: char| c.is_whitespace() || c == '(' || c == '"') {
                continue;
            }
            let rest = rest.trim_start();
            match rest.strip_prefix('(') {
                Some(body) => {
                    in_block = true;
                    body
                }
                None => {
                    if let Some(m) = quoted.captures(rest).and_then(|c| c.get(1)) {
                        found.push(m.as_str());
                    }
                    continue;
                }
            }
        };

        let body = match body.find(')') {
            Some(idx) => {
                in_block = false;
                &body[..idx]
            }
            None => body,
        };
        found.extend(
            quoted
                .captures_iter(body)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str()),
        );
    }

    found
}
