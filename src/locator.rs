use std::path::PathBuf;

use log::{debug, trace};

use crate::models::Language;

/// Manifest filenames recognised per language.
pub const MANIFEST_BINDINGS: &[(Language, &[&str])] = &[
    (Language::Python, &["requirements.txt", "Pipfile", "pyproject.toml"]),
    (Language::JavaScript, &["package.json", "yarn.lock"]),
    (Language::TypeScript, &["package.json", "yarn.lock"]),
    (Language::Java, &["pom.xml", "build.gradle", "build.gradle.kts"]),
    (Language::Ruby, &["Gemfile", "Gemfile.lock"]),
    (Language::Go, &["go.mod"]),
    (Language::Rust, &["Cargo.toml"]),
];

/// Manifest filenames for `language`; empty for languages without any.
pub fn manifest_names(language: Language) -> &'static [&'static str] {
    MANIFEST_BINDINGS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Every file whose name exactly matches one of the language's manifests,
/// in discovery order.
pub fn find_manifests(files: &[PathBuf], language: Language) -> Vec<PathBuf> {
    let names = manifest_names(language);
    let found: Vec<PathBuf> = files
        .iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| names.contains(&n))
        })
        .inspect(|p| trace!("Found manifest: {}", p.display()))
        .cloned()
        .collect();

    debug!("Found {} {} manifests", found.len(), language);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_exact_names_in_order() {
        let files: Vec<PathBuf> = [
            "api/requirements.txt",
            "docs/requirements.txt.bak",
            "pyproject.toml",
            "web/package.json",
            "Pipfile",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let found = find_manifests(&files, Language::Python);
        assert_eq!(
            found,
            vec![
                PathBuf::from("api/requirements.txt"),
                PathBuf::from("pyproject.toml"),
                PathBuf::from("Pipfile"),
            ]
        );
    }

    #[test]
    fn test_language_without_manifests_yields_nothing() {
        let files = vec![PathBuf::from("Makefile"), PathBuf::from("package.json")];
        assert!(find_manifests(&files, Language::C).is_empty());
        assert!(manifest_names(Language::Php).is_empty());
    }
}
