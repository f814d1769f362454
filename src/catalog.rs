use memmap2::Mmap;
use std::fs::File;
use std::io::Cursor;
use std::path::PathBuf;
use zip::ZipArchive;

use crate::error::{ClasspathError, Result};
use crate::normalize::RawResource;

/// Lists the stored files of a jar/zip classpath entry from its central directory.
#[derive(Debug, Clone)]
pub struct ArchiveEntryReader {
    path: PathBuf,
}

impl ArchiveEntryReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn list_resources(&self) -> Result<ArchiveResources> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClasspathError::EntryNotFound(self.path.clone())
            } else {
                ClasspathError::unreadable(&self.path, e)
            }
        })?;
        // SAFETY: The file is opened read-only and the mapping is owned by the archive
        // reader, so it lives exactly as long as the listing that reads from it.
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| ClasspathError::unreadable(&self.path, format!("mmap failed: {e}")))?;
        drop(file);
        let archive = ZipArchive::new(Cursor::new(mmap))
            .map_err(|e| ClasspathError::unreadable(&self.path, e))?;

        Ok(ArchiveResources {
            path: self.path.clone(),
            archive,
            next: 0,
        })
    }
}

/// Raw archive-internal names in central-directory order. Directory entries are skipped.
/// The mapping is released when this value is dropped.
pub struct ArchiveResources {
    path: PathBuf,
    archive: ZipArchive<Cursor<Mmap>>,
    next: usize,
}

impl Iterator for ArchiveResources {
    type Item = Result<RawResource>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.archive.len();
        while self.next < len {
            let index = self.next;
            self.next += 1;
            let entry = match self.archive.by_index_raw(index) {
                Ok(entry) => entry,
                Err(e) => {
                    self.next = len;
                    return Some(Err(ClasspathError::unreadable(&self.path, e)));
                }
            };
            if entry.is_dir() {
                continue;
            }
            return Some(Ok(RawResource::Stored(entry.name().to_string())));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.archive.len().saturating_sub(self.next)))
    }
}
