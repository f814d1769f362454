//! # classpath-dupes
//!
//! Indexes the entries of a JVM classpath and reports resources (classes or
//! other files) that more than one entry provides.
//!
//! ## Architecture
//!
//! - **normalize**: Canonical `/`-separated resource names
//! - **filter**: Default and user-supplied ignore patterns
//! - **scan**: Directory entry listing
//! - **catalog**: Jar/zip entry listing from the central directory
//! - **entry**: Entry classification and the reader variant per container kind
//! - **descriptor**: The resource-name index and its queries
//! - **diagnostic**: Non-fatal scan events and the sinks that receive them
//! - **project**: Scopes, artifacts and artifact-to-file resolution
//! - **report**: JSON and text rendering of query results
//! - **cli** / **config**: Command-line surface and scan configuration

pub mod catalog;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod diagnostic;
pub mod entry;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod project;
pub mod report;
pub mod scan;

pub use descriptor::{ClasspathDescriptor, ScanReport};
pub use entry::{ClasspathEntry, EntryKind};
pub use error::ClasspathError;
pub use filter::IgnoreFilter;
pub use normalize::ResourceName;
