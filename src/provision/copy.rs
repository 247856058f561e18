//! Copying trained ensembles from the training output tree.
//!
//! The source tree is expected to look like:
//!
//! ```text
//! <source_root>/
//!   mfcc/
//!     models/fold_1.h5 ... fold_5.h5
//!     summary.json
//!     fold_metrics.csv
//!   mel/
//!   concat/
//! ```
//!
//! Each category is handled independently; a missing category only produces
//! a [`CategoryCopyStatus::MissingSource`] entry in the report.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModelstageError, Result};

use super::layout::{
    has_extension, ModelStore, CATEGORY_MODELS_DIR, FOLD_METRICS_FILE, SUMMARY_FILE,
};
use super::FeatureCategory;

/// What happened to one category during provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryCopyStatus {
    /// `<source_root>/<category>` does not exist.
    MissingSource { path: PathBuf },
    /// The category directory was processed.
    Copied {
        /// File names of copied model files, in filesystem order.
        models: Vec<String>,
        /// Whether the source had a `models/` directory at all.
        models_dir_found: bool,
        /// Whether `summary.json` was copied.
        summary: bool,
        /// Whether `fold_metrics.csv` was copied.
        fold_metrics: bool,
    },
}

/// Provisioning outcome for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCopy {
    pub category: FeatureCategory,
    #[serde(flatten)]
    pub status: CategoryCopyStatus,
}

impl CategoryCopy {
    /// Number of model files copied for this category.
    pub fn model_count(&self) -> usize {
        match &self.status {
            CategoryCopyStatus::Copied { models, .. } => models.len(),
            CategoryCopyStatus::MissingSource { .. } => 0,
        }
    }
}

/// Outcome of [`ModelProvisioner::provision`].
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    /// The configured source root.
    pub source_root: PathBuf,
    /// Whether the source root existed. When false, `categories` is empty.
    pub source_found: bool,
    /// Per-category outcomes in iteration order.
    pub categories: Vec<CategoryCopy>,
}

impl ProvisionReport {
    /// Total model files copied across all categories.
    pub fn total_models(&self) -> usize {
        self.categories.iter().map(CategoryCopy::model_count).sum()
    }

    /// True iff at least one model file was copied.
    pub fn any_copied(&self) -> bool {
        self.total_models() > 0
    }

    /// Categories whose source directory was missing.
    pub fn missing_categories(&self) -> Vec<FeatureCategory> {
        self.categories
            .iter()
            .filter(|c| matches!(c.status, CategoryCopyStatus::MissingSource { .. }))
            .map(|c| c.category)
            .collect()
    }
}

/// Copies model files and metadata from a training output tree into the
/// project's model store.
#[derive(Debug, Clone)]
pub struct ModelProvisioner {
    source_root: PathBuf,
    store: ModelStore,
    model_extension: String,
}

impl ModelProvisioner {
    /// Create a provisioner copying `*.<model_extension>` files.
    pub fn new(source_root: impl Into<PathBuf>, store: ModelStore, model_extension: &str) -> Self {
        Self {
            source_root: source_root.into(),
            store,
            model_extension: model_extension.to_string(),
        }
    }

    /// The source root this provisioner reads from.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Copy every category's artifacts into the store.
    ///
    /// Missing source directories are recorded, not returned as errors.
    /// I/O failures while copying propagate.
    pub fn provision(&self, categories: &[FeatureCategory]) -> Result<ProvisionReport> {
        if !self.source_root.exists() {
            tracing::debug!(
                "Training output not found: {}",
                self.source_root.display()
            );
            return Ok(ProvisionReport {
                source_root: self.source_root.clone(),
                source_found: false,
                categories: Vec::new(),
            });
        }

        let mut outcomes = Vec::with_capacity(categories.len());
        for &category in categories {
            outcomes.push(self.provision_category(category)?);
        }

        let report = ProvisionReport {
            source_root: self.source_root.clone(),
            source_found: true,
            categories: outcomes,
        };
        tracing::debug!("Copied {} model files", report.total_models());
        Ok(report)
    }

    fn provision_category(&self, category: FeatureCategory) -> Result<CategoryCopy> {
        let source_dir = self.source_root.join(category.as_str());
        if !source_dir.exists() {
            tracing::debug!("Category '{}' not found in {}", category, source_dir.display());
            return Ok(CategoryCopy {
                category,
                status: CategoryCopyStatus::MissingSource { path: source_dir },
            });
        }

        let dest_dir = self.store.category_dir(category);

        let source_models = source_dir.join(CATEGORY_MODELS_DIR);
        let models_dir_found = source_models.is_dir();
        let models = if models_dir_found {
            self.copy_models(&source_models, &self.store.category_models_dir(category))?
        } else {
            Vec::new()
        };

        let summary = copy_if_present(&source_dir.join(SUMMARY_FILE), &dest_dir)?;
        let fold_metrics = copy_if_present(&source_dir.join(FOLD_METRICS_FILE), &dest_dir)?;

        Ok(CategoryCopy {
            category,
            status: CategoryCopyStatus::Copied {
                models,
                models_dir_found,
                summary,
                fold_metrics,
            },
        })
    }

    fn copy_models(&self, source: &Path, dest: &Path) -> Result<Vec<String>> {
        fs::create_dir_all(dest).map_err(|e| ModelstageError::file_access(dest, e))?;

        let entries = fs::read_dir(source).map_err(|e| ModelstageError::file_access(source, e))?;
        let mut copied = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| ModelstageError::file_access(source, e))?;
            let path = entry.path();
            if !path.is_file() || !has_extension(&path, &self.model_extension) {
                continue;
            }

            let name = entry.file_name();
            copy_preserving_mtime(&path, &dest.join(&name))?;
            let name = name.to_string_lossy().into_owned();
            tracing::debug!("Copied {}", name);
            copied.push(name);
        }

        Ok(copied)
    }
}

/// Copy `source` into `dest_dir` under the same name, if it exists.
fn copy_if_present(source: &Path, dest_dir: &Path) -> Result<bool> {
    if !source.is_file() {
        return Ok(false);
    }
    let Some(name) = source.file_name() else {
        return Ok(false);
    };

    fs::create_dir_all(dest_dir).map_err(|e| ModelstageError::file_access(dest_dir, e))?;
    copy_preserving_mtime(source, &dest_dir.join(name))?;
    Ok(true)
}

/// Copy a file, overwriting `dest`, and carry over its modification time.
///
/// `fs::copy` already preserves permission bits.
pub(crate) fn copy_preserving_mtime(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).map_err(|e| ModelstageError::file_access(source, e))?;

    let modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| ModelstageError::file_access(source, e))?;
    open_for_times(dest)
        .and_then(|f| f.set_modified(modified))
        .map_err(|e| ModelstageError::file_access(dest, e))?;

    Ok(())
}

// Read-only models keep their mode after fs::copy; futimens only needs ownership.
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<fs::File> {
    fs::File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> std::io::Result<fs::File> {
    fs::File::options().write(true).open(path)
}
