use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClasspathError {
    #[error("classpath entry not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    #[error("classpath entry unreadable: {}: {reason}", path.display())]
    EntryUnreadable { path: PathBuf, reason: String },

    #[error("invalid resource name {name:?}: {reason}")]
    InvalidResourceName { name: String, reason: &'static str },

    #[error("invalid ignore pattern {pattern:?}: {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },

    #[error("could not resolve dependency {0}: no local project path and no repository file")]
    DependencyResolutionRequired(String),

    #[error("invalid project file {}: {reason}", path.display())]
    ProjectFile { path: PathBuf, reason: String },
}

impl ClasspathError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::EntryUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Missing entries are expected on real classpaths (e.g. an output directory
    /// that was never compiled) and callers usually only log them.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound(_))
    }
}

pub type Result<T, E = ClasspathError> = std::result::Result<T, E>;
