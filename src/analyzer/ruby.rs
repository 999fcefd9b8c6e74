use anyhow::Result;
use regex::Regex;

use crate::models::Dependency;

/// Parse a `Gemfile`: `gem 'name'` with an optional quoted version argument.
pub fn parse_gemfile(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let gem_re = Regex::new(r#"^gem\s+['"]([^'"]+)['"]"#)?;
    let version_re = Regex::new(r#",\s*['"]([^'"]+)['"]"#)?;

    for line in content.lines() {
        let line = line.trim();
        let Some(caps) = gem_re.captures(line) else {
            continue;
        };
        let rest = &line[caps.get(0).map_or(0, |m| m.end())..];
        let version = version_re.captures(rest).map(|v| v[1].to_string());
        deps.push(Dependency::new(&caps[1], version.as_deref(), source));
    }

    Ok(())
}

/// Parse the first `GEMS` block of a `Gemfile.lock`.
///
/// ```text
/// GEMS
///   remote: https://rubygems.org/
///   specs:
///     rails (7.0.0)
///       actionpack (= 7.0.0)
///     nokogiri (1.14.0)
///
/// ```
///
/// Only lines at the indentation of the first `specs:` entry are gems; deeper
/// lines are that gem's own requirements. The block ends at the first blank line.
pub fn parse_gemfile_lock(
    content: &str,
    source: &str,
    deps: &mut Vec<Dependency>,
) -> Result<()> {
    let mut in_gems = false;
    let mut spec_indent: Option<usize> = None;

    for raw in content.lines() {
        let line = raw.trim();

        if !in_gems {
            in_gems = line == "GEMS";
            continue;
        }
        if line.is_empty() {
            break;
        }
        if line.starts_with("specs:") || line.starts_with("remote:") {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        let expected = *spec_indent.get_or_insert(indent);
        if indent > expected {
            continue;
        }

        let mut parts = line.split_whitespace();
        if let (Some(name), Some(version)) = (parts.next(), parts.next()) {
            let version = version.trim_matches(|c| c == '(' || c == ')');
            deps.push(Dependency::new(name, Some(version), source));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gemfile() {
        let content = r#"
source "https://rubygems.org"

gem "rails", "~> 7.0.0"
gem 'pg'
gem 'puma', '>= 5.0', require: false
gem "devise", git: "https://github.com/heartcombo/devise"
# gem "unused", "1.0"
"#;
        let mut deps = Vec::new();
        parse_gemfile(content, "Gemfile", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("rails", Some("~> 7.0.0"), "Gemfile"),
                Dependency::new("pg", None, "Gemfile"),
                Dependency::new("puma", Some(">= 5.0"), "Gemfile"),
                Dependency::new("devise", None, "Gemfile"),
            ]
        );
    }

    #[test]
    fn test_parse_gemfile_lock_stops_at_blank_line() {
        let content = "\
GEMS
  specs:
    rails (7.0.0)
    nokogiri (1.14.0)

    rack (3.0.0)
";
        let mut deps = Vec::new();
        parse_gemfile_lock(content, "Gemfile.lock", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("rails", Some("7.0.0"), "Gemfile.lock"),
                Dependency::new("nokogiri", Some("1.14.0"), "Gemfile.lock"),
            ]
        );
    }

    #[test]
    fn test_parse_gemfile_lock_skips_nested_requirements() {
        let content = r#"GIT
  remote: https://github.com/rails/rails.git
  specs:
    actioncable (7.1.0)

GEMS
  remote: https://rubygems.org/
  specs:
    nokogiri (1.14.0-x86_64-linux)
      racc (~> 1.4)
    racc (1.7.1)

PLATFORMS
  x86_64-linux

DEPENDENCIES
  nokogiri
"#;
        let mut deps = Vec::new();
        parse_gemfile_lock(content, "Gemfile.lock", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("nokogiri", Some("1.14.0-x86_64-linux"), "Gemfile.lock"),
                Dependency::new("racc", Some("1.7.1"), "Gemfile.lock"),
            ]
        );
    }
}
