use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ClasspathError, Result};

/// Canonical resource key: `/`-separated, case preserved, no leading slash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `com/x/Foo.class` -> `com.x.Foo`. `None` for non-class resources.
    pub fn class_name(&self) -> Option<String> {
        self.0
            .strip_suffix(".class")
            .map(|stem| stem.replace('/', "."))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ResourceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn normalize(raw: &str) -> Result<ResourceName> {
    let replaced = raw.replace('\\', "/");
    let trimmed = replaced.trim_start_matches('/');

    if trimmed.is_empty() {
        return Err(ClasspathError::InvalidResourceName {
            name: raw.to_string(),
            reason: "empty name",
        });
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(ClasspathError::InvalidResourceName {
            name: raw.to_string(),
            reason: "name escapes the entry root",
        });
    }

    Ok(ResourceName(trimmed.to_string()))
}

/// Normalizes a file found under a directory entry, relative to that entry's root.
pub fn normalize_path(path: &Path, root: &Path) -> Result<ResourceName> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ClasspathError::InvalidResourceName {
            name: path.to_string_lossy().to_string(),
            reason: "path is outside the entry root",
        })?;
    normalize(&relative.to_string_lossy())
}

/// A name as an entry reader found it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResource {
    /// Regular file found while walking a directory entry.
    File(PathBuf),
    /// File name stored in an archive's central directory.
    Stored(String),
}

impl RawResource {
    pub fn normalize(&self, entry_root: &Path) -> Result<ResourceName> {
        match self {
            Self::File(path) => normalize_path(path, entry_root),
            Self::Stored(name) => normalize(name),
        }
    }
}

impl fmt::Display for RawResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stored(name) => f.write_str(name),
        }
    }
}
