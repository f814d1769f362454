use ignore::{Walk, WalkBuilder};
use std::path::PathBuf;

use crate::error::{ClasspathError, Result};
use crate::normalize::RawResource;

/// Lists every regular file below a directory classpath entry.
#[derive(Debug, Clone)]
pub struct DirectoryEntryReader {
    root: PathBuf,
}

impl DirectoryEntryReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn list_resources(&self) -> Result<DirectoryResources> {
        let meta = std::fs::metadata(&self.root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClasspathError::EntryNotFound(self.root.clone())
            } else {
                ClasspathError::unreadable(&self.root, e)
            }
        })?;
        if !meta.is_dir() {
            return Err(ClasspathError::unreadable(&self.root, "not a directory"));
        }
        std::fs::read_dir(&self.root).map_err(|e| ClasspathError::unreadable(&self.root, e))?;

        let walk = WalkBuilder::new(&self.root)
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        Ok(DirectoryResources {
            root: self.root.clone(),
            walk,
            failed: false,
        })
    }
}

/// Regular files below the root, yielded in file-name order.
/// The first walk error ends the listing.
pub struct DirectoryResources {
    root: PathBuf,
    walk: Walk,
    failed: bool,
}

impl Iterator for DirectoryResources {
    type Item = Result<RawResource>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(ClasspathError::unreadable(&self.root, e)));
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            return Some(Ok(RawResource::File(entry.into_path())));
        }
    }
}
