//! Resource-name index over an ordered classpath.
//!
//! Entries are read in the order they are added, so the provider list of every
//! name reflects classpath precedence: the first provider is the one a class
//! loader would pick, later ones are shadowed duplicates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::entry::{ClasspathEntry, EntryKind};
use crate::error::{ClasspathError, Result};
use crate::filter::IgnoreFilter;
use crate::normalize::ResourceName;

pub type Providers<'a> = Vec<&'a ClasspathEntry>;

pub struct ClasspathDescriptor {
    filter: IgnoreFilter,
    entries: Vec<ClasspathEntry>,
    /// Canonical location of each entry, parallel to `entries`.
    locations: Vec<(PathBuf, EntryKind)>,
    index: BTreeMap<ResourceName, Vec<usize>>,
    sink: Box<dyn DiagnosticSink>,
}

#[derive(Debug)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub error: ClasspathError,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub added: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ScanReport {
    pub fn not_found(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped.iter().filter(|s| s.error.is_not_found())
    }

    fn merge(&mut self, other: ScanReport) {
        self.added += other.added;
        self.skipped.extend(other.skipped);
    }
}

impl ClasspathDescriptor {
    pub fn new(filter: IgnoreFilter) -> Self {
        Self::with_sink(filter, Box::new(TracingSink))
    }

    pub fn with_sink(filter: IgnoreFilter, sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            filter,
            entries: Vec::new(),
            locations: Vec::new(),
            index: BTreeMap::new(),
            sink,
        }
    }

    /// Indexes one entry and returns how many resource names it contributed.
    ///
    /// The whole listing is read before the index is touched, so an entry that
    /// fails halfway leaves no trace. Names that fail normalization are skipped
    /// and reported to the sink.
    pub fn add(&mut self, entry: ClasspathEntry) -> Result<usize> {
        let names = self.read_names(&entry)?;
        let id = self.entry_id(entry);

        for name in names.iter() {
            let providers = self.index.entry(name.clone()).or_default();
            if !providers.contains(&id) {
                providers.push(id);
            }
        }
        Ok(names.len())
    }

    pub fn add_path(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
        let entry = ClasspathEntry::classify(path)?;
        self.add(entry)
    }

    /// Adds every entry in order. Failures are collected and reported, never
    /// short-circuited.
    pub fn add_all<I>(&mut self, entries: I) -> ScanReport
    where
        I: IntoIterator<Item = ClasspathEntry>,
    {
        let mut report = ScanReport::default();
        for entry in entries {
            let path = entry.path().to_path_buf();
            let result = self.add(entry);
            report.merge(self.record(path, result));
        }
        report
    }

    pub fn add_all_paths<I, P>(&mut self, paths: I) -> ScanReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut report = ScanReport::default();
        for path in paths {
            let path = path.into();
            let result = self.add_path(path.clone());
            report.merge(self.record(path, result));
        }
        report
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &ResourceName> {
        self.index.keys()
    }

    /// Indexed class files as `(fully.qualified.Name, resource name)` pairs.
    pub fn class_names(&self) -> impl Iterator<Item = (String, &ResourceName)> {
        self.index
            .keys()
            .filter_map(|name| name.class_name().map(|fqn| (fqn, name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Providers of `name` in classpath order. Empty when the name is unknown.
    pub fn entries_providing(&self, name: &str) -> Providers<'_> {
        self.index
            .get(name)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    /// Every indexed name ending with `query`, compared both against the resource
    /// name and, for class files, the dotted class name. So `Foo`, `x.Foo` and
    /// `com/x/Foo.class` all find `com/x/Foo.class`.
    pub fn find_by_query(&self, query: &str) -> BTreeMap<&ResourceName, Providers<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return BTreeMap::new();
        }
        self.index
            .iter()
            .filter(|(name, _)| matches_query(name, query))
            .map(|(name, ids)| (name, self.resolve(ids)))
            .collect()
    }

    pub fn duplicates(&self) -> BTreeMap<&ResourceName, Providers<'_>> {
        self.index
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, ids)| (name, self.resolve(ids)))
            .collect()
    }

    pub fn all(&self) -> BTreeMap<&ResourceName, Providers<'_>> {
        self.index
            .iter()
            .map(|(name, ids)| (name, self.resolve(ids)))
            .collect()
    }

    fn read_names(&mut self, entry: &ClasspathEntry) -> Result<Vec<ResourceName>> {
        let mut names = Vec::new();
        for raw in entry.reader().list_resources()? {
            let raw = raw?;
            match raw.normalize(entry.path()) {
                Ok(name) if self.filter.should_ignore(name.as_str()) => {}
                Ok(name) => names.push(name),
                Err(e) => self.sink.report(Diagnostic::InvalidResourceName {
                    entry: entry.path().to_path_buf(),
                    name: raw.to_string(),
                    reason: name_error_reason(&e),
                }),
            }
        }
        Ok(names)
    }

    /// Entries naming the same file through different spellings (`lib/../lib`,
    /// symlinks) share one id. The first spelling added is the one reported.
    fn entry_id(&mut self, entry: ClasspathEntry) -> usize {
        let location = (
            std::fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf()),
            entry.kind(),
        );
        if let Some(id) = self.locations.iter().position(|l| *l == location) {
            return id;
        }
        self.locations.push(location);
        self.entries.push(entry);
        self.entries.len() - 1
    }

    fn resolve(&self, ids: &[usize]) -> Providers<'_> {
        ids.iter().map(|&id| &self.entries[id]).collect()
    }

    fn record(&mut self, path: PathBuf, result: Result<usize>) -> ScanReport {
        match result {
            Ok(_) => ScanReport {
                added: 1,
                skipped: Vec::new(),
            },
            Err(error) => {
                self.sink.report(Diagnostic::for_entry(path.clone(), &error));
                ScanReport {
                    added: 0,
                    skipped: vec![SkippedEntry { path, error }],
                }
            }
        }
    }
}

fn matches_query(name: &ResourceName, query: &str) -> bool {
    name.as_str().ends_with(query) || name.class_name().is_some_and(|fqn| fqn.ends_with(query))
}

fn name_error_reason(err: &ClasspathError) -> String {
    match err {
        ClasspathError::InvalidResourceName { reason, .. } => reason.to_string(),
        other => other.to_string(),
    }
}

/// Convenience for callers holding plain paths.
pub fn paths_of<'a>(providers: &[&'a ClasspathEntry]) -> Vec<&'a Path> {
    providers.iter().map(|e| e.path()).collect()
}
