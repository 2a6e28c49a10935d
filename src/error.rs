//! Error handling for nodedump-rs
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the dump pipeline.

use crate::types::Bucket;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for node dump operations
#[derive(Error, Debug)]
pub enum DumpError {
    /// The reflection catalog returned inconsistent data
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A member's pin type could not be resolved
    #[error("Pin type error: {0}")]
    PinType(String),

    /// The scratch node factory failed to build or populate a node
    #[error("Node factory error: {0}")]
    NodeFactory(String),

    /// A bucket document could not be written
    #[error("Failed to write {bucket} document to {path:?}: {message}")]
    Write {
        bucket: Bucket,
        path: PathBuf,
        message: String,
    },

    /// Every bucket document failed to write
    #[error("All {0} bucket documents failed to write")]
    AllWritesFailed(usize),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DumpError>,
    },
}

impl DumpError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DumpError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        DumpError::Serialization(err.to_string())
    }
}

/// Result type alias for node dump operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Extension trait for adding context to io Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DumpError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DumpError::from(e).with_context(f()))
    }
}
