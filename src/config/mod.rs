//! Configuration module for nodedump-rs
//!
//! This module handles dump configuration including:
//! - Walker filters (synthetic type prefixes, reserved event names)
//! - Classification rule tables
//! - Output naming and formatting
//!
//! Every field has a default, so an empty or partial TOML file is valid.
//!
//! # Config Location
//!
//! The CLI looks for `nodedump.toml` in the platform config directory under
//! `dev.nodedump-rs` unless a path is given:
//! - **Linux**: `~/.config/dev.nodedump-rs/`
//! - **macOS**: `~/Library/Application Support/dev.nodedump-rs/`
//! - **Windows**: `%APPDATA%\dev.nodedump-rs\`
//!
//! # Example
//!
//! ```toml
//! module_root = "/Script/CoreUObject"
//!
//! [walker]
//! skip_type_prefixes = ["SKEL_", "REINST_", "TRASHCLASS_"]
//!
//! [output]
//! file_prefix = "MyLibrary"
//! pretty = false
//! ```

pub mod rules;

pub use rules::ClassificationRules;

use crate::error::{DumpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.nodedump-rs";

/// Config filename
pub const CONFIG_FILE: &str = "nodedump.toml";

/// Default root prepended to rendered type paths
pub const DEFAULT_MODULE_ROOT: &str = "/Script/CoreUObject";

/// Default prefix of the output document names
pub const DEFAULT_FILE_PREFIX: &str = "UEBlueprintLibrary";

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Dump Config ====================

/// Complete configuration for a dump run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Root prepended to rendered type paths (`<root>.<Kind>'<path>'`)
    #[serde(default = "default_module_root")]
    pub module_root: String,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub rules: ClassificationRules,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_module_root() -> String {
    DEFAULT_MODULE_ROOT.to_string()
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            module_root: default_module_root(),
            walker: WalkerConfig::default(),
            rules: ClassificationRules::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DumpConfig {
    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DumpError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Invalid config file {:?}", path)))
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DumpError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config file to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| DumpError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DumpError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| DumpError::Config(format!("Failed to write config {:?}: {}", path, e)))
    }
}

// ==================== Walker Config ====================

/// Filters applied while walking the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Type name prefixes marking compiler-generated or reinstanced types
    #[serde(default = "default_skip_type_prefixes")]
    pub skip_type_prefixes: Vec<String>,

    /// Event name substrings marking internally generated dispatchers
    #[serde(default = "default_reserved_event_markers")]
    pub reserved_event_markers: Vec<String>,
}

fn default_skip_type_prefixes() -> Vec<String> {
    vec!["SKEL_".to_string(), "REINST_".to_string()]
}

fn default_reserved_event_markers() -> Vec<String> {
    vec!["ExecuteUbergraph".to_string()]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            skip_type_prefixes: default_skip_type_prefixes(),
            reserved_event_markers: default_reserved_event_markers(),
        }
    }
}

impl WalkerConfig {
    /// Check if a type name marks a build artifact
    pub fn is_synthetic_type(&self, type_name: &str) -> bool {
        self.skip_type_prefixes
            .iter()
            .any(|prefix| type_name.starts_with(prefix.as_str()))
    }

    /// Check if an event name marks the reserved dispatcher
    pub fn is_reserved_event(&self, event_name: &str) -> bool {
        self.reserved_event_markers
            .iter()
            .any(|marker| event_name.contains(marker.as_str()))
    }
}

// ==================== Output Config ====================

/// Output document naming and formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Documents are named `<file_prefix>_<Bucket>.json`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Pretty-print the JSON documents
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            pretty: true,
        }
    }
}
