use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::project::{Artifact, ProjectDescriptor, Scope};

pub const CLASSPATH_ENV: &str = "CLASSPATH";

#[derive(Debug, Clone)]
pub struct ScopeScan {
    pub label: String,
    pub classpath: Vec<PathBuf>,
    pub artifacts: Vec<Artifact>,
    pub output_directories: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub use_default_ignores: bool,
    pub ignored_resources: Vec<String>,
    pub scans: Vec<ScopeScan>,
}

pub fn resolve_scan_config(cli: &Cli) -> Result<ScanConfig> {
    if !cli.scope.is_empty() && cli.project.is_none() {
        bail!("--scope requires --project");
    }

    let mut scans = Vec::new();

    if let Some(path) = cli.project.as_deref() {
        let project = ProjectDescriptor::load(path)
            .with_context(|| format!("Failed to load project file: {}", path.display()))?;
        scans.extend(project_scans(&project, &cli.scope));
    }

    if !cli.classpath.is_empty() {
        scans.push(plain_scan(cli.classpath.iter().map(OsStr::new)));
    } else if cli.project.is_none() {
        let value = env::var_os(CLASSPATH_ENV).context(
            "No classpath given (use --classpath, --project, or set the CLASSPATH variable)",
        )?;
        scans.push(plain_scan([value.as_os_str()]));
    }

    Ok(ScanConfig {
        use_default_ignores: !cli.no_default_ignores,
        ignored_resources: cli.ignored_resources.clone(),
        scans,
    })
}

/// Selected scopes in compile, runtime, test order; all scopes in the file when
/// none are selected.
pub fn project_scans(project: &ProjectDescriptor, selected: &[Scope]) -> Vec<ScopeScan> {
    Scope::ALL
        .into_iter()
        .filter(|s| selected.is_empty() || selected.contains(s))
        .filter_map(|scope| {
            let cp = project.scope(scope)?;
            let mut output_directories: Vec<PathBuf> =
                project.output_directory.iter().cloned().collect();
            if scope == Scope::Test {
                output_directories.extend(project.test_output_directory.iter().cloned());
            }
            Some(ScopeScan {
                label: scope.to_string(),
                classpath: cp.classpath.clone(),
                artifacts: cp.artifacts.clone(),
                output_directories,
            })
        })
        .collect()
}

fn plain_scan<'a>(values: impl IntoIterator<Item = &'a OsStr>) -> ScopeScan {
    let classpath = values
        .into_iter()
        .flat_map(env::split_paths)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    ScopeScan {
        label: "command-line".to_string(),
        classpath,
        artifacts: Vec::new(),
        output_directories: Vec::new(),
    }
}
