use std::path::{Path, PathBuf};

use log::debug;

use crate::models::Language;

/// Extension table in declaration order. The order is the tie-break policy.
pub const LANGUAGE_EXTENSIONS: &[(Language, &[&str])] = &[
    (Language::Python, &["py"]),
    (Language::JavaScript, &["js", "jsx"]),
    (Language::Java, &["java"]),
    (Language::Ruby, &["rb"]),
    (Language::Go, &["go"]),
    (Language::C, &["c", "h"]),
    (Language::Cpp, &["cpp", "hpp", "cc"]),
    (Language::TypeScript, &["ts", "tsx"]),
    (Language::Php, &["php"]),
    (Language::Rust, &["rs"]),
];

/// Map a path to a language by its (case-insensitive) extension.
pub fn language_for(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    LANGUAGE_EXTENSIONS
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(lang, _)| *lang)
}

/// Count files per language. Every known language starts at zero.
pub fn count_languages(files: &[PathBuf]) -> Vec<(Language, usize)> {
    let mut counts: Vec<(Language, usize)> =
        LANGUAGE_EXTENSIONS.iter().map(|(lang, _)| (*lang, 0)).collect();

    for file in files {
        if let Some(lang) = language_for(file) {
            if let Some(entry) = counts.iter_mut().find(|(l, _)| *l == lang) {
                entry.1 += 1;
            }
        }
    }

    counts
}

/// Pick the dominant language, or `None` when nothing matched.
///
/// Ties go to the language declared first in [`LANGUAGE_EXTENSIONS`].
pub fn detect_language(files: &[PathBuf]) -> Option<Language> {
    let counts = count_languages(files);
    debug!("Language census: {:?}", counts);

    let mut best: Option<(Language, usize)> = None;
    for (lang, count) in counts {
        if count == 0 {
            continue;
        }
        // strictly greater keeps the earlier language on ties
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((lang, count));
        }
    }

    best.map(|(lang, _)| lang)
}
