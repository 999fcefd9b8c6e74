use anyhow::Result;
use toml::Value;

use crate::analyzer::python::scalar_string;
use crate::models::Dependency;

const SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

/// Parse `Cargo.toml` dependency tables, including `[target.'cfg(..)'.*]` ones.
pub fn parse_cargo_toml(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let manifest: Value = toml::from_str(content)?;

    push_sections(&manifest, source, deps);

    if let Some(targets) = manifest.get("target").and_then(Value::as_table) {
        for target in targets.values() {
            push_sections(target, source, deps);
        }
    }

    Ok(())
}

fn push_sections(table: &Value, source: &str, deps: &mut Vec<Dependency>) {
    for section in SECTIONS {
        let Some(entries) = table.get(section).and_then(Value::as_table) else {
            continue;
        };
        for (name, spec) in entries {
            // serde = "1" or serde = { version = "1", features = [...] }
            let version = match spec {
                Value::Table(t) => t.get("version").and_then(scalar_string),
                other => scalar_string(other),
            };
            deps.push(Dependency::new(name.as_str(), version.as_deref(), source));
        }
    }
}
