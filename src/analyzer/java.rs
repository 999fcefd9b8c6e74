use anyhow::{bail, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use regex::Regex;

use crate::models::Dependency;

const POM_NAMESPACE: &[u8] = b"http://maven.apache.org/POM/4.0.0";

/// `group:artifact` keeps Maven coordinates in one name.
fn coordinate(group_id: &str, artifact_id: &str) -> String {
    format!("{}:{}", group_id, artifact_id)
}

#[derive(Clone, Copy)]
enum Field {
    GroupId,
    ArtifactId,
    Version,
}

#[derive(Default)]
struct PendingDependency {
    depth: usize,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

/// Parse `pom.xml` using the quick-xml namespace-aware event API.
///
/// Every `dependency` element in the POM namespace counts, including those under
/// `dependencyManagement` and plugins. Elements outside the namespace are ignored.
pub fn parse_pom_xml(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut depth: usize = 0;
    let mut pending: Option<PendingDependency> = None;
    let mut field: Option<Field> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_pom = matches!(ns, ResolveResult::Bound(Namespace(n)) if n == POM_NAMESPACE);

        match event {
            Event::Start(ref e) => {
                depth += 1;
                field = None;
                if !in_pom {
                    continue;
                }
                let local = e.local_name();
                let name = local.as_ref();
                match pending.as_ref() {
                    None if name == b"dependency" => {
                        pending = Some(PendingDependency {
                            depth,
                            ..Default::default()
                        });
                    }
                    Some(dep) if depth == dep.depth + 1 => {
                        field = match name {
                            b"groupId" => Some(Field::GroupId),
                            b"artifactId" => Some(Field::ArtifactId),
                            b"version" => Some(Field::Version),
                            _ => None,
                        };
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if let (Some(dep), Some(f)) = (pending.as_mut(), field) {
                    let text = e.unescape()?.trim().to_string();
                    match f {
                        Field::GroupId => dep.group_id = Some(text),
                        Field::ArtifactId => dep.artifact_id = Some(text),
                        Field::Version => dep.version = Some(text),
                    }
                }
            }
            Event::End(_) => {
                if pending.as_ref().is_some_and(|d| d.depth == depth) {
                    if let Some(dep) = pending.take() {
                        let (Some(group_id), Some(artifact_id)) = (dep.group_id, dep.artifact_id)
                        else {
                            bail!("dependency element missing groupId or artifactId");
                        };
                        deps.push(Dependency::new(
                            coordinate(&group_id, &artifact_id),
                            dep.version.as_deref(),
                            source,
                        ));
                    }
                }
                field = None;
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(())
}

/// Parse `build.gradle` or `build.gradle.kts` line by line.
///
/// Matches: implementation 'group:artifact:version'
///          api "group:artifact"
///          compile("group:artifact:version")
pub fn parse_build_gradle(content: &str, source: &str, deps: &mut Vec<Dependency>) -> Result<()> {
    let re = Regex::new(
        r#"^(?:implementation|compile|api)(?:\s+|\s*\(\s*)['"]([^:'"]+):([^:'"]+)(?::([^'"]+))?['"]"#,
    )?;

    for line in content.lines() {
        if let Some(caps) = re.captures(line.trim()) {
            let version = caps.get(3).map(|m| m.as_str());
            deps.push(Dependency::new(coordinate(&caps[1], &caps[2]), version, source));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.slf4j</groupId>
        <artifactId>slf4j-api</artifactId>
        <version>2.0.9</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>3.12.0</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <scope>test</scope>
      <exclusions>
        <exclusion>
          <groupId>org.hamcrest</groupId>
          <artifactId>hamcrest-core</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_parse_pom_xml() {
        let mut deps = Vec::new();
        parse_pom_xml(POM, "pom.xml", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("org.slf4j:slf4j-api", Some("2.0.9"), "pom.xml"),
                Dependency::new("org.apache.commons:commons-lang3", Some("3.12.0"), "pom.xml"),
                Dependency::new("junit:junit", None, "pom.xml"),
            ]
        );
    }

    #[test]
    fn test_pom_outside_maven_namespace_is_ignored() {
        let xml = r#"<project>
  <dependencies>
    <dependency><groupId>junit</groupId><artifactId>junit</artifactId></dependency>
  </dependencies>
</project>"#;
        let mut deps = Vec::new();
        parse_pom_xml(xml, "pom.xml", &mut deps).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_malformed_pom_keeps_earlier_records() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
  <dependencies>
    <dependency><groupId>a</groupId><artifactId>b</artifactId></dependency>
    <dependency><groupId>c</oops>
  </dependencies>
</project>"#;
        let mut deps = Vec::new();
        assert!(parse_pom_xml(xml, "pom.xml", &mut deps).is_err());
        assert_eq!(deps, vec![Dependency::new("a:b", None, "pom.xml")]);
    }

    #[test]
    fn test_parse_build_gradle() {
        let content = r#"
dependencies {
    implementation 'org.springframework:spring-core:5.3.23'
    api "com.google.guava:guava"
    compile("io.netty:netty-all:4.1.100.Final")
    testImplementation 'junit:junit:4.13.2'
    compileOnly 'org.projectlombok:lombok:1.18.30'
}
"#;
        let mut deps = Vec::new();
        parse_build_gradle(content, "build.gradle", &mut deps).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("org.springframework:spring-core", Some("5.3.23"), "build.gradle"),
                Dependency::new("com.google.guava:guava", None, "build.gradle"),
                Dependency::new("io.netty:netty-all", Some("4.1.100.Final"), "build.gradle"),
            ]
        );
    }
}
