use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.depscan/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Scan behaviour.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Controls what the scan walks and which stages run.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Run the source import scanner after manifest parsing. Defaults to `true`.
    #[serde(default = "default_code_imports")]
    pub code_imports: bool,
    /// Directory names skipped by the walk wherever they occur (e.g. `"node_modules"`).
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_code_imports() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            code_imports: default_code_imports(),
            exclude: Vec::new(),
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the scan configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.depscan/config.toml`
/// 3. `~/.config/depscan/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".depscan").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("depscan").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.scan.code_imports);
        assert!(config.scan.exclude.is_empty());

        let config: Config = toml::from_str("").unwrap();
        assert!(config.scan.code_imports);
    }

    #[test]
    fn test_project_config_is_loaded() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".depscan")).unwrap();
        fs::write(
            dir.path().join(".depscan/config.toml"),
            "[scan]\ncode_imports = false\nexclude = [\"node_modules\", \"vendor\"]\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert!(!config.scan.code_imports);
        assert_eq!(config.scan.exclude, vec!["node_modules", "vendor"]);
    }

    #[test]
    fn test_override_wins_and_errors_surface() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[scan]\nexclude = [\"target\"]\n").unwrap();

        let config = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(config.scan.exclude, vec!["target"]);
        assert!(config.scan.code_imports);

        fs::write(&path, "[scan\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }
}
