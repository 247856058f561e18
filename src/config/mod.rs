//! Configuration loading, merging, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use modelstage::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".modelstage");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "source_root: /data/train").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert!(config.source_root.is_some());
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.modelstage/config.yml`)
//! 2. Local overrides (`.modelstage/config.local.yml`)
//!
//! `--source-root` / `MODELSTAGE_SOURCE_ROOT` override `source_root` last.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_value, load_merged_config, ConfigPaths, CONFIG_DIR};
pub use merger::{deep_merge, merge_configs};
pub use schema::{ModelstageConfig, OutputMode, RuntimeConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
