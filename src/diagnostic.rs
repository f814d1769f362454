//! Non-fatal scan diagnostics and where they go.
//!
//! The descriptor reports through a caller-supplied [`DiagnosticSink`] instead of
//! logging on its own, so embedding code decides whether events become log lines,
//! channel messages or nothing at all.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::error::ClasspathError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    EntryNotFound {
        path: PathBuf,
    },
    EntryUnreadable {
        path: PathBuf,
        reason: String,
    },
    InvalidResourceName {
        entry: PathBuf,
        name: String,
        reason: String,
    },
}

impl Diagnostic {
    pub fn for_entry(path: PathBuf, err: &ClasspathError) -> Self {
        match err {
            ClasspathError::EntryNotFound(_) => Self::EntryNotFound { path },
            ClasspathError::EntryUnreadable { reason, .. } => Self::EntryUnreadable {
                path,
                reason: reason.clone(),
            },
            other => Self::EntryUnreadable {
                path,
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryNotFound { path } => {
                write!(f, "could not access classpath element {}", path.display())
            }
            Self::EntryUnreadable { path, reason } => {
                write!(f, "error reading classpath element {}: {reason}", path.display())
            }
            Self::InvalidResourceName {
                entry,
                name,
                reason,
            } => write!(
                f,
                "skipping resource {name:?} in {}: {reason}",
                entry.display()
            ),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`. Missing entries are routine and go to debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::EntryNotFound { .. } => tracing::debug!("{diagnostic}"),
            _ => tracing::warn!("{diagnostic}"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

pub struct FnSink<F>(pub F);

impl<F: FnMut(Diagnostic)> DiagnosticSink for FnSink<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic)
    }
}

impl DiagnosticSink for Sender<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        let _ = self.send(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn channel_sink_delivers_in_order() {
        let (mut tx, rx) = mpsc::channel();
        tx.report(Diagnostic::EntryNotFound {
            path: PathBuf::from("a"),
        });
        tx.report(Diagnostic::EntryUnreadable {
            path: PathBuf::from("b"),
            reason: "bad".to_string(),
        });
        drop(tx);
        let got: Vec<Diagnostic> = rx.iter().collect();
        assert_eq!(got.len(), 2);
        assert!(matches!(got[0], Diagnostic::EntryNotFound { .. }));
    }

    #[test]
    fn fn_sink_and_entry_mapping() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink(|d: Diagnostic| seen.push(d));
            let err = ClasspathError::unreadable("x.jar", "invalid Zip archive");
            sink.report(Diagnostic::for_entry(PathBuf::from("x.jar"), &err));
        }
        assert_eq!(
            seen,
            vec![Diagnostic::EntryUnreadable {
                path: PathBuf::from("x.jar"),
                reason: "invalid Zip archive".to_string(),
            }]
        );
    }
}
