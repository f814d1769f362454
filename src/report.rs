use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::descriptor::{Providers, ScanReport};
use crate::entry::EntryKind;
use crate::normalize::ResourceName;
use crate::project::Artifact;

#[derive(Debug, Serialize)]
pub struct Report {
    pub scopes: Vec<ScopeReport>,
}

#[derive(Debug, Serialize)]
pub struct ScopeReport {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub indexed_resources: usize,
    pub matches: Vec<MatchReport>,
    pub skipped: Vec<SkippedReport>,
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub duplicate: bool,
    pub sources: Vec<SourceReport>,
}

#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub path: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkippedReport {
    pub path: String,
    pub not_found: bool,
    pub reason: String,
}

pub fn scope_report(
    scope: &str,
    query: Option<&str>,
    indexed_resources: usize,
    matches: &BTreeMap<&ResourceName, Providers<'_>>,
    artifacts: &HashMap<PathBuf, Option<&Artifact>>,
    scan: &ScanReport,
) -> ScopeReport {
    let matches = matches
        .iter()
        .map(|(name, providers)| MatchReport {
            name: name.to_string(),
            class_name: name.class_name(),
            duplicate: providers.len() > 1,
            sources: providers
                .iter()
                .map(|entry| SourceReport {
                    path: entry.path().to_string_lossy().to_string(),
                    kind: entry.kind(),
                    artifact: artifacts
                        .get(entry.path())
                        .copied()
                        .flatten()
                        .map(|a| a.id.clone()),
                })
                .collect(),
        })
        .collect();

    let skipped = scan
        .skipped
        .iter()
        .map(|s| SkippedReport {
            path: s.path.to_string_lossy().to_string(),
            not_found: s.error.is_not_found(),
            reason: s.error.to_string(),
        })
        .collect();

    ScopeReport {
        scope: scope.to_string(),
        query: query.map(str::to_string),
        indexed_resources,
        matches,
        skipped,
    }
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for scope in &report.scopes {
        let _ = writeln!(out, "Checking {} classpath", scope.scope);
        for m in &scope.matches {
            let _ = writeln!(out, "FOUND: {}", m.name);
            for source in &m.sources {
                match &source.artifact {
                    Some(id) => {
                        let _ = writeln!(out, "\tsource: {} ({id})", source.path);
                    }
                    None => {
                        let _ = writeln!(out, "\tsource: {}", source.path);
                    }
                }
            }
        }
        for s in &scope.skipped {
            let _ = writeln!(out, "skipped: {}", s.reason);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SkippedEntry;
    use crate::entry::ClasspathEntry;
    use crate::error::ClasspathError;
    use crate::normalize::normalize;

    #[test]
    fn text_lists_sources_under_found_line() {
        let name = normalize("com/x/Foo.class").unwrap();
        let dir = ClasspathEntry::new("/work/classes", EntryKind::Directory);
        let jar = ClasspathEntry::new("/repo/b.jar", EntryKind::Archive);
        let artifact = Artifact {
            id: "g:b:1".to_string(),
            ..Artifact::default()
        };

        let mut matches = BTreeMap::new();
        matches.insert(&name, vec![&dir, &jar]);
        let mut artifacts = HashMap::new();
        artifacts.insert(PathBuf::from("/repo/b.jar"), Some(&artifact));
        artifacts.insert(PathBuf::from("/work/classes"), None);
        let scan = ScanReport {
            added: 2,
            skipped: vec![SkippedEntry {
                path: PathBuf::from("/gone.jar"),
                error: ClasspathError::EntryNotFound(PathBuf::from("/gone.jar")),
            }],
        };

        let scope = scope_report("compile", Some("Foo"), 1, &matches, &artifacts, &scan);
        assert!(scope.matches[0].duplicate);
        assert_eq!(scope.matches[0].class_name.as_deref(), Some("com.x.Foo"));
        assert!(scope.skipped[0].not_found);

        let text = render_text(&Report {
            scopes: vec![scope],
        });
        assert_eq!(
            text,
            "Checking compile classpath\n\
             FOUND: com/x/Foo.class\n\
             \tsource: /work/classes\n\
             \tsource: /repo/b.jar (g:b:1)\n\
             skipped: classpath entry not found: /gone.jar\n"
        );
    }
}
