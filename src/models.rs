use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source tag carried by records derived from import statements.
pub const CODE_SOURCE: &str = "code";

/// A single declared or imported dependency.
///
/// `version` is `None` whenever the originating format does not state one;
/// it is never `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: Option<String>,
    pub source: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: Option<&str>, source: &str) -> Self {
        Dependency {
            name: name.into(),
            version: version
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            source: source.to_string(),
        }
    }

    /// A dependency inferred from source code.
    pub fn from_code(name: impl Into<String>) -> Self {
        Dependency {
            name: name.into(),
            version: None,
            source: CODE_SOURCE.to_string(),
        }
    }
}

/// Languages recognised by the detector, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Ruby,
    Go,
    C,
    #[serde(rename = "C++")]
    Cpp,
    TypeScript,
    #[serde(rename = "PHP")]
    Php,
    Rust,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Python => write!(f, "Python"),
            Language::JavaScript => write!(f, "JavaScript"),
            Language::Java => write!(f, "Java"),
            Language::Ruby => write!(f, "Ruby"),
            Language::Go => write!(f, "Go"),
            Language::C => write!(f, "C"),
            Language::Cpp => write!(f, "C++"),
            Language::TypeScript => write!(f, "TypeScript"),
            Language::Php => write!(f, "PHP"),
            Language::Rust => write!(f, "Rust"),
        }
    }
}

/// The serialisable result of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// `None` when no file matched a known extension.
    pub language: Option<Language>,
    pub dependencies: Vec<Dependency>,
}

/// A recovered, per-file failure. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Diagnostic {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_version_is_unspecified() {
        let dep = Dependency::new("flask", Some("  "), "requirements.txt");
        assert_eq!(dep.version, None);
        let dep = Dependency::new("flask", Some(" 2.0.1 "), "requirements.txt");
        assert_eq!(dep.version.as_deref(), Some("2.0.1"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report {
            language: Some(Language::Cpp),
            dependencies: vec![Dependency::from_code("boost")],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["language"], "C++");
        assert_eq!(json["dependencies"][0]["version"], serde_json::Value::Null);
        assert_eq!(json["dependencies"][0]["source"], "code");

        let undetermined = Report {
            language: None,
            dependencies: Vec::new(),
        };
        let json = serde_json::to_value(&undetermined).unwrap();
        assert!(json["language"].is_null());
    }
}
