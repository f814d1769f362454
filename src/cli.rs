use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::project::Scope;

#[derive(Debug, Clone, Parser)]
#[command(name = "classpath-dupes")]
#[command(about = "Report classes and resources provided by more than one classpath entry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Classpath entries joined with the platform path separator. Repeatable.
    #[arg(long, value_name = "PATHS", global = true)]
    pub classpath: Vec<String>,

    /// JSON project file listing the classpath and artifacts of each scope.
    #[arg(long, value_name = "FILE", global = true)]
    pub project: Option<PathBuf>,

    /// Only scan these project scopes. Requires --project.
    #[arg(long, value_enum, value_name = "SCOPE", global = true)]
    pub scope: Vec<Scope>,

    #[arg(long, global = true)]
    pub no_default_ignores: bool,

    /// Extra resource to ignore: a literal name, a glob, or `regex:<expr>`.
    #[arg(long = "ignore", value_name = "PATTERN", global = true)]
    pub ignored_resources: Vec<String>,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub skip: bool,

    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resources whose name (or dotted class name) ends with NAME.
    Find { class_name: String },
    /// Every resource provided by more than one entry.
    Duplicates,
    /// Every indexed resource with its providers.
    List,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
