//! What a build tool hands over: per-scope classpaths plus the artifacts behind them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ClasspathError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Runtime,
    Test,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Compile, Scope::Runtime, Scope::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    /// `group:artifact:version`
    pub id: String,
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    /// Resolved file in the local repository.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Output directory of the reactor module that builds this artifact, if any.
    #[serde(default)]
    pub module_output: Option<PathBuf>,
    #[serde(default)]
    pub module_test_output: Option<PathBuf>,
}

fn default_artifact_type() -> String {
    "jar".to_string()
}

impl Artifact {
    /// A reactor module's output directory when the artifact is built in this
    /// project. Test jars only count when their test output exists.
    pub fn local_project_path(&self) -> Option<&Path> {
        if self.artifact_type == "test-jar" {
            return self
                .module_test_output
                .as_deref()
                .filter(|dir| dir.exists());
        }
        self.module_output.as_deref()
    }

    /// Zero, one or two locations: the local project path and the repository file.
    pub fn physical_paths(&self) -> Vec<&Path> {
        self.local_project_path()
            .into_iter()
            .chain(self.file.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeClasspath {
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    #[serde(default)]
    pub test_output_directory: Option<PathBuf>,
    #[serde(default)]
    pub scopes: BTreeMap<Scope, ScopeClasspath>,
}

impl ProjectDescriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ClasspathError::ProjectFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut project: Self =
            serde_json::from_str(&raw).map_err(|e| ClasspathError::ProjectFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if let Some(base) = path.parent() {
            project.resolve_relative_to(base);
        }
        Ok(project)
    }

    pub fn scope(&self, scope: Scope) -> Option<&ScopeClasspath> {
        self.scopes.get(&scope)
    }

    /// Paths in the file are relative to the file's own directory.
    fn resolve_relative_to(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.output_directory.iter_mut().for_each(fix);
        self.test_output_directory.iter_mut().for_each(fix);
        for scope in self.scopes.values_mut() {
            scope.classpath.iter_mut().for_each(fix);
            for artifact in scope.artifacts.iter_mut() {
                artifact.file.iter_mut().for_each(fix);
                artifact.module_output.iter_mut().for_each(fix);
                artifact.module_test_output.iter_mut().for_each(fix);
            }
        }
    }
}

/// Maps every physical location to the artifact it came from. The project's own
/// output directories map to `None`. Fails when an artifact has no location at all,
/// since the classpath cannot be trusted then.
pub fn artifacts_by_file<'a>(
    artifacts: &'a [Artifact],
    output_directories: &[PathBuf],
) -> Result<HashMap<PathBuf, Option<&'a Artifact>>> {
    let mut by_file = HashMap::with_capacity(artifacts.len() + 1);
    for artifact in artifacts {
        let paths = artifact.physical_paths();
        if paths.is_empty() {
            return Err(ClasspathError::DependencyResolutionRequired(
                artifact.id.clone(),
            ));
        }
        for path in paths {
            by_file.insert(path.to_path_buf(), Some(artifact));
        }
    }
    for dir in output_directories.iter().filter(|d| d.exists()) {
        by_file.insert(dir.clone(), None);
    }
    Ok(by_file)
}
