//! Post-copy verification of the model store.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::layout::{has_extension, ModelStore};
use super::FeatureCategory;

/// Default ensemble size of a k-fold training run.
pub const DEFAULT_EXPECTED_FOLDS: usize = 5;

/// Verification result for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCheck {
    pub category: FeatureCategory,
    /// Directory that was scanned.
    pub models_dir: PathBuf,
    /// Model files found, or `None` when the directory is absent.
    pub found: Option<usize>,
    pub expected: usize,
}

impl CategoryCheck {
    /// A category is valid when it has at least the expected number of models.
    pub fn is_valid(&self) -> bool {
        self.found.is_some_and(|n| n >= self.expected)
    }
}

/// Outcome of [`ModelVerifier::verify`].
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub categories: Vec<CategoryCheck>,
}

impl VerifyReport {
    /// True iff every category is valid.
    pub fn all_valid(&self) -> bool {
        self.categories.iter().all(CategoryCheck::is_valid)
    }

    /// Categories that fell short.
    pub fn invalid(&self) -> impl Iterator<Item = &CategoryCheck> {
        self.categories.iter().filter(|c| !c.is_valid())
    }
}

/// Counts model files per category in the model store.
#[derive(Debug, Clone)]
pub struct ModelVerifier {
    store: ModelStore,
    model_extension: String,
    expected_folds: usize,
}

impl ModelVerifier {
    /// Create a verifier over the store rooted at `models_root`.
    pub fn new(
        models_root: impl Into<PathBuf>,
        model_extension: &str,
        expected_folds: usize,
    ) -> Self {
        Self {
            store: ModelStore::new(models_root),
            model_extension: model_extension.to_string(),
            expected_folds,
        }
    }

    /// Check every category. Shortfalls are reported, never raised.
    pub fn verify(&self, categories: &[FeatureCategory]) -> VerifyReport {
        let categories = categories
            .iter()
            .map(|&category| {
                let models_dir = self.store.category_models_dir(category);
                let found = count_models(&models_dir, &self.model_extension);
                let check = CategoryCheck {
                    category,
                    models_dir,
                    found,
                    expected: self.expected_folds,
                };
                if !check.is_valid() {
                    tracing::debug!(
                        "{}: {}/{} models",
                        category,
                        found.unwrap_or(0),
                        self.expected_folds
                    );
                }
                check
            })
            .collect();

        VerifyReport { categories }
    }
}

fn count_models(dir: &Path, extension: &str) -> Option<usize> {
    if !dir.is_dir() {
        return None;
    }
    let entries = fs::read_dir(dir).ok()?;
    Some(
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, extension))
            .count(),
    )
}
