//! Configuration file discovery and loading.
//!
//! Merge order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (`.modelstage/config.yml`)
//! 3. Local overrides (`.modelstage/config.local.yml`)
//!
//! An explicit `--config` path replaces steps 2 and 3.

use crate::config::merger::merge_configs;
use crate::config::schema::ModelstageConfig;
use crate::error::{ModelstageError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".modelstage";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .modelstage/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .modelstage/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// All existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Load a config file as a raw YAML value.
///
/// An empty file is an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ModelstageError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ModelstageError::file_access(path, e)
        }
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| ModelstageError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Value::Mapping(Default::default())),
        Value::Mapping(_) => Ok(value),
        _ => Err(ModelstageError::ConfigParseError {
            path: path.to_path_buf(),
            message: "expected a mapping at the top level".to_string(),
        }),
    }
}

/// Turn merged layers into a typed config.
fn parse_layers(layers: &[Value], source: &Path) -> Result<ModelstageConfig> {
    let merged = merge_configs(layers);
    serde_yaml::from_value(merged).map_err(|e| ModelstageError::ConfigParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge project config files. Missing files mean defaults.
pub fn load_merged_config(project_root: &Path) -> Result<ModelstageConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();
    if existing.is_empty() {
        tracing::debug!("No config files under {}, using defaults", project_root.display());
        return Ok(ModelstageConfig::default());
    }

    let mut layers = Vec::with_capacity(existing.len());
    for path in &existing {
        tracing::debug!("Loading config from {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let last = existing.last().map(|p| p.as_path()).unwrap_or(project_root);
    parse_layers(&layers, last)
}

/// Load the config for a command: an explicit file, or the project layers.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<ModelstageConfig> {
    match explicit {
        Some(path) => {
            let value = load_config_value(path)?;
            parse_layers(&[value], path)
        }
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::FeatureCategory;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn no_files_means_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, ModelstageConfig::default());
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "source_root: /shared/train\nexpected_folds: 5",
        );
        write_config(temp.path(), "config.local.yml", "source_root: /home/me/train");

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(config.source_root, Some(PathBuf::from("/home/me/train")));
        assert_eq!(config.expected_folds, 5);
    }

    #[test]
    fn empty_file_is_allowed() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.categories, FeatureCategory::ALL);
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "config.yml", "categories: [mfcc");

        let err = load_merged_config(temp.path()).unwrap_err();
        match err {
            ModelstageError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_mapping_top_level_is_rejected() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "- mfcc\n- mel");

        assert!(matches!(
            load_merged_config(temp.path()),
            Err(ModelstageError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn explicit_path_skips_project_layers() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "model_extension: keras");
        let other = temp.path().join("other.yml");
        fs::write(&other, "expected_folds: 10").unwrap();

        let config = load_config(temp.path(), Some(other.as_path())).unwrap();

        assert_eq!(config.expected_folds, 10);
        assert_eq!(config.model_extension, "h5");
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ModelstageError::ConfigNotFound { .. }));
    }

    #[test]
    fn discover_lists_existing_in_order() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.local.yml", "{}");
        write_config(temp.path(), "config.yml", "{}");

        let paths = ConfigPaths::discover(temp.path());
        let existing = paths.all_existing();

        assert_eq!(existing.len(), 2);
        assert!(existing[0].ends_with("config.yml"));
        assert!(existing[1].ends_with("config.local.yml"));
    }
}
