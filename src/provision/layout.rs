//! Project directory layout and scaffold creation.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModelstageError, Result};

use super::FeatureCategory;

/// Directory holding copied ensembles and `classes.json`.
pub const MODELS_DIR: &str = "models";

/// Scaffold directories, relative to the project root.
pub const SCAFFOLD_DIRS: &[&str] = &[MODELS_DIR, "templates", "uploads", "results", "static"];

/// File name of the label set inside the model store.
pub const CLASSES_FILE: &str = "classes.json";

/// Per-category metadata file carrying the optional `classes` field.
pub const SUMMARY_FILE: &str = "summary.json";

/// Per-category fold metrics, copied verbatim.
pub const FOLD_METRICS_FILE: &str = "fold_metrics.csv";

/// Subdirectory holding the fold models of one category.
pub const CATEGORY_MODELS_DIR: &str = "models";

/// Paths inside the project's model store (`<project>/models`).
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
}

impl ModelStore {
    /// Model store for the given project root.
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(MODELS_DIR))
    }

    /// Model store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `models/<category>`
    pub fn category_dir(&self, category: FeatureCategory) -> PathBuf {
        self.root.join(category.as_str())
    }

    /// `models/<category>/models`
    pub fn category_models_dir(&self, category: FeatureCategory) -> PathBuf {
        self.category_dir(category).join(CATEGORY_MODELS_DIR)
    }

    /// `models/classes.json`
    pub fn classes_file(&self) -> PathBuf {
        self.root.join(CLASSES_FILE)
    }
}

/// Outcome of [`ensure_structure`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScaffoldReport {
    /// Directories created by this run.
    pub created: Vec<PathBuf>,
    /// Directories that were already present.
    pub existing: Vec<PathBuf>,
}

/// Ensure every scaffold directory exists under `project_root`.
///
/// Existing directories and their contents are left alone. Only a failing
/// `create_dir_all` (permissions, a file in the way) is an error.
pub fn ensure_structure(project_root: &Path) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for name in SCAFFOLD_DIRS {
        let dir = project_root.join(name);
        if dir.is_dir() {
            report.existing.push(dir);
            continue;
        }

        fs::create_dir_all(&dir).map_err(|e| ModelstageError::file_access(&dir, e))?;
        tracing::debug!("Created directory {}", dir.display());
        report.created.push(dir);
    }

    Ok(report)
}

/// Whether `path` has the given extension (without the dot), compared
/// case-sensitively: `fold_1.H5` is not an `h5` model.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_all_scaffold_dirs() {
        let temp = TempDir::new().unwrap();
        let report = ensure_structure(temp.path()).unwrap();

        assert_eq!(report.created.len(), SCAFFOLD_DIRS.len());
        assert!(report.existing.is_empty());
        for name in SCAFFOLD_DIRS {
            assert!(temp.path().join(name).is_dir());
        }
    }

    #[test]
    fn second_run_reports_existing() {
        let temp = TempDir::new().unwrap();
        ensure_structure(temp.path()).unwrap();
        let report = ensure_structure(temp.path()).unwrap();

        assert!(report.created.is_empty());
        assert_eq!(report.existing.len(), SCAFFOLD_DIRS.len());
    }

    #[test]
    fn leaves_unrelated_files_untouched() {
        let temp = TempDir::new().unwrap();
        let models = temp.path().join("models");
        fs::create_dir_all(models.join("old")).unwrap();
        fs::write(models.join("notes.txt"), "keep me").unwrap();
        fs::write(models.join("old").join("weights.h5"), "w").unwrap();

        ensure_structure(temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(models.join("notes.txt")).unwrap(),
            "keep me"
        );
        assert!(models.join("old").join("weights.h5").exists());
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("uploads"), "not a dir").unwrap();

        let err = ensure_structure(temp.path()).unwrap_err();
        assert!(matches!(err, ModelstageError::FileAccess { .. }));
    }

    #[test]
    fn model_store_paths() {
        let store = ModelStore::for_project(Path::new("/app"));
        assert_eq!(store.root(), Path::new("/app/models"));
        assert_eq!(
            store.category_models_dir(FeatureCategory::Mel),
            PathBuf::from("/app/models/mel/models")
        );
        assert_eq!(
            store.classes_file(),
            PathBuf::from("/app/models/classes.json")
        );
    }

    #[test]
    fn extension_match_is_exact() {
        assert!(has_extension(Path::new("fold_1.h5"), "h5"));
        assert!(!has_extension(Path::new("fold_1.h5.bak"), "h5"));
        assert!(!has_extension(Path::new("h5"), "h5"));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(!has_extension(Path::new("fold_1.H5"), "h5"));
        assert!(has_extension(Path::new("fold_1.H5"), "H5"));
    }
}
