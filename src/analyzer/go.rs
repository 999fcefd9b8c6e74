use anyhow::Result;

use crate::models::Dependency;

/// Parse `go.mod` require directives, both the single-line and the block form.
pub fn parse_go_mod(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("require") else {
            continue;
        };

        if rest.trim_start().starts_with('(') {
            for line in lines.by_ref() {
                let line = line.trim();
                if line == ")" {
                    break;
                }
                if line.is_empty() || line.starts_with("//") {
                    continue;
                }
                push_module(line.split_whitespace(), source, deps);
            }
        } else if rest.starts_with(char::is_whitespace) {
            push_module(rest.split_whitespace(), source, deps);
        }
    }

    Ok(())
}

fn push_module<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    source: &str,
    deps: &mut Vec<Dependency>,
) {
    if let (Some(module), Some(version)) = (tokens.next(), tokens.next()) {
        deps.push(Dependency::new(module, Some(version), source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_mod_block() {
        let content = r#"module example.com/app

go 1.21

require (
	github.com/gin-gonic/gin v1.9.1
	golang.org/x/sync v0.5.0 // indirect
	github.com/stretchr/testify v1.8.4
	// github.com/old/dep v0.0.1
)
"#;
        let mut deps = Vec::new();
        parse_go_mod(content, "go.mod", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("github.com/gin-gonic/gin", Some("v1.9.1"), "go.mod"),
                Dependency::new("golang.org/x/sync", Some("v0.5.0"), "go.mod"),
                Dependency::new("github.com/stretchr/testify", Some("v1.8.4"), "go.mod"),
            ]
        );
    }

    #[test]
    fn test_parse_go_mod_single_line() {
        let content = "module x\n\nrequire github.com/pkg/errors v0.9.1\nrequirements v1\n";
        let mut deps = Vec::new();
        parse_go_mod(content, "go.mod", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![Dependency::new("github.com/pkg/errors", Some("v0.9.1"), "go.mod")]
        );
    }
}
