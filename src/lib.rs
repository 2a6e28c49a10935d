//! # nodedump-rs: Node Descriptor Dumper
//!
//! Walks a reflection type catalog and emits a normalized descriptor for every
//! graph node a visual scripting editor could place: function calls, events,
//! property getters and setters, and the built-in Branch and Sequence nodes.
//! Descriptors are written as three JSON documents (Full, Essentials, Debug)
//! for downstream tooling.
//!
//! ## Architecture
//!
//! - **Catalog**: the [`ReflectionCatalog`] seam, an in-memory implementation
//!   loadable from JSON, and the member walker
//! - **Pipeline**: scratch-node pin discovery, normalization, classification
//!   and bucketed output
//! - **Config**: TOML dump configuration with defaults for every field
//!
//! ## Configuration
//!
//! The CLI reads `nodedump.toml` from the platform config directory under
//! `dev.nodedump-rs`:
//!
//! - **Linux**: `~/.config/dev.nodedump-rs/`
//! - **macOS**: `~/Library/Application Support/dev.nodedump-rs/`
//! - **Windows**: `%APPDATA%\dev.nodedump-rs\`
//!
//! ## Example
//!
//! ```no_run
//! use nodedump_rs::{config::DumpConfig, InMemoryCatalog};
//!
//! fn main() -> nodedump_rs::Result<()> {
//!     let catalog = InMemoryCatalog::load("catalog.json")?;
//!     let report = nodedump_rs::dump_all_nodes(&catalog, "out/", &DumpConfig::default())?;
//!     println!("{} descriptors", report.full);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use catalog::{InMemoryCatalog, ReflectionCatalog, TypeCatalogWalker};
pub use config::DumpConfig;
pub use error::{DumpError, Result};
pub use pipeline::{dump_all_nodes, DumpReport, NodeDumper};
pub use types::{Bucket, BucketSet, NodeDescriptor, NodeKind, PinDescriptor, PinDirection};
