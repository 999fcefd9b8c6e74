use anyhow::{bail, Result};
use regex::Regex;
use serde_json::Value;

use crate::models::Dependency;

/// Parse `package.json` — `dependencies` then `devDependencies`, names and
/// version ranges taken verbatim.
pub fn parse_package_json(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let json: Value = serde_json::from_str(content)?;
    if !json.is_object() {
        bail!("expected a JSON object at the top level");
    }

    for section in ["dependencies", "devDependencies"] {
        if let Some(pkgs) = json.get(section).and_then(Value::as_object) {
            for (name, range) in pkgs {
                deps.push(Dependency::new(name.as_str(), range.as_str(), source));
            }
        }
    }

    Ok(())
}

/// Parse `yarn.lock` (classic and berry) — custom line-based format.
///
/// An unindented header such as `lodash@^4.17.0, lodash@^4.17.21:` opens an
/// entry; the first `version` line inside it gives the resolved version.
pub fn parse_yarn_lock(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    // "foo@^1.0.0", "@scope/foo@^1.0.0", "foo@npm:^1.0.0"
    let header_re = Regex::new(r#"^"?(@?[^@"\s]+)@"#)?;
    let version_re = Regex::new(r#"^\s+version:?\s+"?([^"\s]+)"?"#)?;
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if line.trim().is_empty()
            || line.starts_with('#')
            || line.starts_with(char::is_whitespace)
        {
            continue;
        }
        if !line.trim_end().ends_with(':') {
            continue;
        }

        // Comma-separated specs share one entry: take the first name
        let first_spec = line.split(", ").next().unwrap_or(line);
        let Some(caps) = header_re.captures(first_spec) else {
            continue;
        };
        let name = caps[1].to_string();

        let mut version = None;
        while let Some(next) = lines.peek().copied() {
            if next.trim().is_empty() || !next.starts_with(char::is_whitespace) {
                break;
            }
            lines.next();
            if version.is_none() {
                version = version_re.captures(next).map(|c| c[1].to_string());
            }
        }

        deps.push(Dependency::new(name, version.as_deref(), source));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_json() {
        let json = r#"{
  "name": "my-app",
  "dependencies": {
    "express": "^4.18.2",
    "lodash": "^4.17.21"
  },
  "devDependencies": {
    "jest": "^29.0.0"
  }
}"#;
        let mut deps = Vec::new();
        parse_package_json(json, "package.json", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("express", Some("^4.18.2"), "package.json"),
                Dependency::new("lodash", Some("^4.17.21"), "package.json"),
                Dependency::new("jest", Some("^29.0.0"), "package.json"),
            ]
        );
    }

    #[test]
    fn test_package_json_must_be_an_object() {
        let mut deps = Vec::new();
        assert!(parse_package_json("[1, 2]", "package.json", &mut deps).is_err());
    }

    #[test]
    fn test_parse_yarn_lock_classic() {
        let content = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


"@babel/code-frame@^7.0.0", "@babel/code-frame@^7.22.13":
  version "7.22.13"
  resolved "https://registry.yarnpkg.com/@babel/code-frame/-/code-frame-7.22.13.tgz"
  dependencies:
    chalk "^2.4.2"

lodash@^4.17.21:
  version "4.17.21"
  resolved "https://registry.yarnpkg.com/lodash/-/lodash-4.17.21.tgz"

"local-pkg@file:./packages/local":
  resolved "file:./packages/local"
"#;
        let mut deps = Vec::new();
        parse_yarn_lock(content, "yarn.lock", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("@babel/code-frame", Some("7.22.13"), "yarn.lock"),
                Dependency::new("lodash", Some("4.17.21"), "yarn.lock"),
                Dependency::new("local-pkg", None, "yarn.lock"),
            ]
        );
    }

    #[test]
    fn test_parse_yarn_lock_berry() {
        let content = r#"__metadata:
  version: 6

"react@npm:^18.2.0":
  version: 18.2.0
  resolution: "react@npm:18.2.0"
"#;
        let mut deps = Vec::new();
        parse_yarn_lock(content, "yarn.lock", &mut deps).unwrap();
        assert_eq!(deps, vec![Dependency::new("react", Some("18.2.0"), "yarn.lock")]);
    }
}
