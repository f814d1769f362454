use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::catalog::{ArchiveEntryReader, ArchiveResources};
use crate::error::{ClasspathError, Result};
use crate::normalize::RawResource;
use crate::scan::{DirectoryEntryReader, DirectoryResources};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    Archive,
}

impl EntryKind {
    /// Directories are recognized by file type; every other existing file is
    /// treated as an archive candidate and validated when it is opened.
    pub fn classify(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ClasspathError::EntryNotFound(path.to_path_buf()),
            _ => ClasspathError::unreadable(path, e),
        })?;
        if meta.is_dir() {
            Ok(Self::Directory)
        } else if meta.is_file() {
            Ok(Self::Archive)
        } else {
            Err(ClasspathError::unreadable(
                path,
                "neither a directory nor a regular file",
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClasspathEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl ClasspathEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn classify(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let kind = EntryKind::classify(&path)?;
        Ok(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn reader(&self) -> EntryReader {
        match self.kind {
            EntryKind::Directory => EntryReader::Directory(DirectoryEntryReader::new(&self.path)),
            EntryKind::Archive => EntryReader::Archive(ArchiveEntryReader::new(&self.path)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntryReader {
    Directory(DirectoryEntryReader),
    Archive(ArchiveEntryReader),
}

impl EntryReader {
    /// Re-reads the underlying directory or archive on every call.
    pub fn list_resources(&self) -> Result<ResourceIter> {
        match self {
            Self::Directory(reader) => reader.list_resources().map(ResourceIter::Directory),
            Self::Archive(reader) => reader.list_resources().map(ResourceIter::Archive),
        }
    }
}

pub enum ResourceIter {
    Directory(DirectoryResources),
    Archive(ArchiveResources),
}

impl Iterator for ResourceIter {
    type Item = Result<RawResource>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Directory(it) => it.next(),
            Self::Archive(it) => it.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_directory_file_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        std::fs::write(&jar, b"").unwrap();

        assert_eq!(
            ClasspathEntry::classify(dir.path()).unwrap().kind(),
            EntryKind::Directory
        );
        assert_eq!(
            ClasspathEntry::classify(&jar).unwrap().kind(),
            EntryKind::Archive
        );
        let err = ClasspathEntry::classify(dir.path().join("gone")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn reader_variant_follows_kind() {
        let entry = ClasspathEntry::new("/tmp/classes", EntryKind::Directory);
        assert!(matches!(entry.reader(), EntryReader::Directory(_)));
        let entry = ClasspathEntry::new("/tmp/lib.jar", EntryKind::Archive);
        assert!(matches!(entry.reader(), EntryReader::Archive(_)));
    }
}
