//! modelstage - Workspace provisioning for the audio classifier web demo.
//!
//! modelstage takes the output tree of a k-fold training run and turns a bare
//! checkout of the demo into a ready-to-serve project: scaffold directories,
//! copied model ensembles and metadata, a `classes.json` label file, and the
//! `requirements.txt`/`README.md` pair.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`provision`] - Directory scaffold, model copy, label resolution, verification
//! - [`requirements`] - Python interpreter and package checks
//! - [`runner`] - Pipeline orchestration and interrupt handling
//! - [`shell`] - External program execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use modelstage::provision::{FeatureCategory, ModelVerifier};
//! use tempfile::TempDir;
//!
//! let project = TempDir::new().unwrap();
//! let verifier = ModelVerifier::new(project.path().join("models"), "h5", 5);
//! let report = verifier.verify(FeatureCategory::ALL);
//! assert!(!report.all_valid());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod provision;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{ModelstageError, Result};
