//! Configuration schema definitions.
//!
//! This module contains the structs that map to `.modelstage/config.yml`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ModelstageError, Result};
use crate::provision::{FeatureCategory, DEFAULT_EXPECTED_FOLDS};
use crate::requirements::{RuntimeVersion, DEFAULT_PACKAGES};

/// Root configuration structure for `.modelstage/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ModelstageConfig {
    /// Root of the training output tree (relative paths resolve against the
    /// project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,

    /// Feature categories to provision, in label-fallback order
    pub categories: Vec<FeatureCategory>,

    /// Extension of model files, without the dot
    pub model_extension: String,

    /// Models each category needs to pass verification
    pub expected_folds: usize,

    /// Python interpreter settings
    pub runtime: RuntimeConfig,

    /// Python import names the demo needs
    pub packages: Vec<String>,

    /// Global settings
    pub settings: Settings,
}

impl Default for ModelstageConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            categories: FeatureCategory::ALL.to_vec(),
            model_extension: default_model_extension(),
            expected_folds: DEFAULT_EXPECTED_FOLDS,
            runtime: RuntimeConfig::default(),
            packages: DEFAULT_PACKAGES.iter().map(|s| s.to_string()).collect(),
            settings: Settings::default(),
        }
    }
}

impl ModelstageConfig {
    /// The configured source root, resolved against `project_root`.
    pub fn resolved_source_root(&self, project_root: &Path) -> Result<PathBuf> {
        let root = self
            .source_root
            .as_ref()
            .ok_or(ModelstageError::SourceRootNotConfigured)?;
        Ok(project_root.join(root))
    }

    /// The minimum interpreter version, parsed.
    pub fn minimum_version(&self) -> Result<RuntimeVersion> {
        self.runtime
            .minimum_version
            .parse()
            .map_err(|message| ModelstageError::ConfigValidationError {
                message: format!("runtime.minimum_version: {}", message),
            })
    }
}

/// Python interpreter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Interpreter executable (name on PATH or absolute path)
    pub interpreter: String,

    /// Minimum version, `MAJOR.MINOR[.PATCH]`; the major version must match
    pub minimum_version: String,

    /// Run the version check before provisioning
    pub check: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            minimum_version: "3.8".to_string(),
            check: true,
        }
    }
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,
}

/// Output verbosity in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

fn default_model_extension() -> String {
    "h5".to_string()
}

#[cfg(windows)]
fn default_interpreter() -> String {
    "python".to_string()
}

#[cfg(not(windows))]
fn default_interpreter() -> String {
    "python3".to_string()
}
