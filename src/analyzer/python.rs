use anyhow::Result;
use regex::Regex;
use toml::Value;

use crate::models::Dependency;

/// Parse `requirements.txt`.
///
/// Each non-comment line is split on the first version operator; the left side
/// is the name and the right side (if any) the version.
pub fn parse_requirements_txt(
    content: &str,
    source: &str,
    deps: &mut Vec<Dependency>,
) -> Result<()> {
    let op_re = Regex::new(r"==|>=|<=|~=|!=|>|<")?;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, version) = match op_re.find(line) {
            Some(m) => (&line[..m.start()], Some(&line[m.end()..])),
            None => (line, None),
        };
        deps.push(Dependency::new(name.trim(), version, source));
    }

    Ok(())
}

/// Parse Poetry's `[tool.poetry.dependencies]` from `pyproject.toml`.
///
/// The `python` entry is the interpreter constraint, not a package.
pub fn parse_pyproject_toml(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let pyproject: Value = toml::from_str(content)?;

    let Some(table) = pyproject
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(|p| p.get("dependencies"))
        .and_then(Value::as_table)
    else {
        return Ok(());
    };

    for (name, spec) in table {
        if name == "python" {
            continue;
        }
        deps.push(Dependency::new(name.as_str(), scalar_string(spec).as_deref(), source));
    }

    Ok(())
}

/// Parse `[packages]` and `[dev-packages]` from a `Pipfile`. `"*"` means any version.
pub fn parse_pipfile(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let pipfile: Value = toml::from_str(content)?;

    for section in ["packages", "dev-packages"] {
        let Some(table) = pipfile.get(section).and_then(Value::as_table) else {
            continue;
        };
        for (name, spec) in table {
            // { version = "...", extras = [...] } carries its constraint under `version`
            let version = match spec {
                Value::Table(t) => t.get("version").and_then(scalar_string),
                other => scalar_string(other),
            };
            let version = version.filter(|v| v != "*");
            deps.push(Dependency::new(name.as_str(), version.as_deref(), source));
        }
    }

    Ok(())
}

/// String form of a TOML scalar; `None` for arrays and tables.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
