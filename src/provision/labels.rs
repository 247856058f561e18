//! Class label discovery and the `classes.json` label file.
//!
//! Labels come from the first source that yields anything, never a merge:
//!
//! 1. `<source_root>/test_web/<label>/` directories, sorted by name
//! 2. the `classes` array of the first category's `summary.json` that has one
//! 3. a placeholder set that has to be edited by hand

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModelstageError, Result};

use super::layout::{ModelStore, SUMMARY_FILE};
use super::FeatureCategory;

/// Directory of per-label sample folders in the training output.
pub const TEST_WEB_DIR: &str = "test_web";

/// Written when no labels could be discovered.
pub const PLACEHOLDER_LABELS: &[&str] = &["clase_ejemplo_1", "clase_ejemplo_2", "clase_ejemplo_3"];

/// Where a label set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelSource {
    /// Subdirectory names of `test_web/`.
    TestWeb { path: PathBuf },
    /// The `classes` field of a category's `summary.json`.
    Metadata {
        category: FeatureCategory,
        path: PathBuf,
    },
    /// Nothing usable was found.
    Placeholder,
}

/// A `summary.json` that exists but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMetadata {
    pub category: FeatureCategory,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of [`LabelResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelResolution {
    pub labels: Vec<String>,
    pub source: LabelSource,
    /// Metadata files passed over on the way to `source`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedMetadata>,
}

impl LabelResolution {
    /// Whether the placeholder set was used.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, LabelSource::Placeholder)
    }
}

/// Resolves the label set from a training output tree.
#[derive(Debug, Clone)]
pub struct LabelResolver {
    source_root: PathBuf,
    categories: Vec<FeatureCategory>,
}

impl LabelResolver {
    /// Create a resolver that falls back to metadata in `categories` order.
    pub fn new(source_root: impl Into<PathBuf>, categories: &[FeatureCategory]) -> Self {
        Self {
            source_root: source_root.into(),
            categories: categories.to_vec(),
        }
    }

    /// Resolve the label set. Never fails; the worst case is the placeholder.
    pub fn resolve(&self) -> LabelResolution {
        let mut skipped = Vec::new();
        let test_web = self.source_root.join(TEST_WEB_DIR);

        let found = if test_web.is_dir() {
            let labels = list_label_dirs(&test_web);
            tracing::debug!("Found {} labels in {}", labels.len(), test_web.display());
            Some((labels, LabelSource::TestWeb { path: test_web }))
        } else {
            self.from_metadata(&mut skipped)
        };

        match found {
            Some((labels, source)) if !labels.is_empty() => LabelResolution {
                labels,
                source,
                skipped,
            },
            _ => {
                tracing::debug!("No class labels found, writing placeholder labels");
                LabelResolution {
                    labels: PLACEHOLDER_LABELS.iter().map(|s| s.to_string()).collect(),
                    source: LabelSource::Placeholder,
                    skipped,
                }
            }
        }
    }

    /// First category whose metadata carries a `classes` array, taken verbatim.
    ///
    /// An empty array still ends the search.
    fn from_metadata(
        &self,
        skipped: &mut Vec<SkippedMetadata>,
    ) -> Option<(Vec<String>, LabelSource)> {
        for &category in &self.categories {
            let path = self.source_root.join(category.as_str()).join(SUMMARY_FILE);
            if !path.is_file() {
                continue;
            }

            match read_classes(&path) {
                Ok(Some(labels)) => {
                    return Some((labels, LabelSource::Metadata { category, path }));
                }
                Ok(None) => continue,
                Err(reason) => {
                    tracing::debug!("Skipping {}: {}", path.display(), reason);
                    skipped.push(SkippedMetadata {
                        category,
                        path,
                        reason,
                    });
                }
            }
        }
        None
    }
}

/// Sorted names of the immediate subdirectories of `dir`.
fn list_label_dirs(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut labels: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    labels.sort();
    labels
}

/// `Ok(None)` when the file has no `classes` field.
fn read_classes(path: &Path) -> std::result::Result<Option<Vec<String>>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {}", e))?;

    let Some(classes) = value.get("classes") else {
        return Ok(None);
    };

    serde_json::from_value::<Vec<String>>(classes.clone())
        .map(Some)
        .map_err(|_| "'classes' is not an array of strings".to_string())
}

/// A resolved label set persisted to the model store.
#[derive(Debug, Clone, Serialize)]
pub struct LabelOutcome {
    /// Path of the written `classes.json`.
    pub path: PathBuf,
    #[serde(flatten)]
    pub resolution: LabelResolution,
}

impl LabelOutcome {
    /// The first `limit` labels and how many were left out.
    pub fn preview(&self, limit: usize) -> (&[String], usize) {
        let labels = &self.resolution.labels;
        let shown = labels.len().min(limit);
        (&labels[..shown], labels.len() - shown)
    }
}

/// Write the label set as a pretty-printed JSON array, replacing any
/// existing file.
///
/// Non-ASCII labels are written as-is, not escaped.
pub fn write_labels(resolution: LabelResolution, store: &ModelStore) -> Result<LabelOutcome> {
    let dir = store.root();
    fs::create_dir_all(dir).map_err(|e| ModelstageError::file_access(dir, e))?;

    let path = store.classes_file();
    let json = serde_json::to_string_pretty(&resolution.labels)?;
    fs::write(&path, json).map_err(|e| ModelstageError::file_access(&path, e))?;
    tracing::debug!(
        "Wrote {} labels to {}",
        resolution.labels.len(),
        path.display()
    );

    Ok(LabelOutcome { path, resolution })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_summary(root: &Path, category: &str, content: &str) {
        let dir = root.join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("summary.json"), content).unwrap();
    }

    fn read_written(store: &ModelStore) -> Vec<String> {
        let content = fs::read_to_string(store.classes_file()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_web_takes_precedence_over_metadata() {
        let source = TempDir::new().unwrap();
        for label in ["perro", "gato", "ave"] {
            fs::create_dir_all(source.path().join("test_web").join(label)).unwrap();
        }
        fs::write(source.path().join("test_web").join("readme.txt"), "x").unwrap();
        write_summary(source.path(), "mfcc", r#"{"classes": ["z", "y"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();

        assert_eq!(resolution.labels, vec!["ave", "gato", "perro"]);
        assert!(matches!(resolution.source, LabelSource::TestWeb { .. }));
    }

    #[test]
    fn metadata_classes_are_taken_verbatim() {
        let source = TempDir::new().unwrap();
        write_summary(source.path(), "mfcc", r#"{"classes": ["c", "a", "c"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();

        assert_eq!(resolution.labels, vec!["c", "a", "c"]);
        assert_eq!(
            resolution.source,
            LabelSource::Metadata {
                category: FeatureCategory::Mfcc,
                path: source.path().join("mfcc").join("summary.json"),
            }
        );
    }

    #[test]
    fn first_category_in_order_wins() {
        let source = TempDir::new().unwrap();
        write_summary(source.path(), "mel", r#"{"classes": ["from_mel"]}"#);
        write_summary(source.path(), "concat", r#"{"classes": ["from_concat"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();
        assert_eq!(resolution.labels, vec!["from_mel"]);
    }

    #[test]
    fn metadata_without_classes_field_is_passed_over() {
        let source = TempDir::new().unwrap();
        write_summary(source.path(), "mfcc", r#"{"accuracy": 0.91}"#);
        write_summary(source.path(), "mel", r#"{"classes": ["x"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();

        assert_eq!(resolution.labels, vec!["x"]);
        assert!(resolution.skipped.is_empty());
    }

    #[test]
    fn invalid_metadata_is_skipped_and_recorded() {
        let source = TempDir::new().unwrap();
        write_summary(source.path(), "mfcc", "{not json");
        write_summary(source.path(), "mel", r#"{"classes": "a,b"}"#);
        write_summary(source.path(), "concat", r#"{"classes": ["ok"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();

        assert_eq!(resolution.labels, vec!["ok"]);
        assert_eq!(resolution.skipped.len(), 2);
        assert_eq!(resolution.skipped[0].category, FeatureCategory::Mfcc);
        assert!(resolution.skipped[1].reason.contains("array of strings"));
    }

    #[test]
    fn empty_classes_stops_search_and_falls_back() {
        let source = TempDir::new().unwrap();
        write_summary(source.path(), "mfcc", r#"{"classes": []}"#);
        write_summary(source.path(), "mel", r#"{"classes": ["unused"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();
        assert!(resolution.is_placeholder());
    }

    #[test]
    fn empty_test_web_does_not_fall_back_to_metadata() {
        let source = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("test_web")).unwrap();
        write_summary(source.path(), "mfcc", r#"{"classes": ["unused"]}"#);

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();
        assert!(resolution.is_placeholder());
    }

    #[test]
    fn placeholder_when_nothing_found() {
        let source = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let store = ModelStore::for_project(project.path());

        let resolution = LabelResolver::new(source.path(), FeatureCategory::ALL).resolve();
        write_labels(resolution, &store).unwrap();

        assert_eq!(
            read_written(&store),
            vec!["clase_ejemplo_1", "clase_ejemplo_2", "clase_ejemplo_3"]
        );
    }

    #[test]
    fn missing_source_root_yields_placeholder() {
        let resolution = LabelResolver::new("/definitely/not/here", FeatureCategory::ALL).resolve();
        assert!(resolution.is_placeholder());
        assert_eq!(resolution.labels.len(), 3);
    }

    #[test]
    fn written_file_is_indented_and_keeps_non_ascii() {
        let project = TempDir::new().unwrap();
        let store = ModelStore::for_project(project.path());
        let resolution = LabelResolution {
            labels: vec!["canción".to_string(), "pájaro".to_string()],
            source: LabelSource::Placeholder,
            skipped: Vec::new(),
        };

        write_labels(resolution, &store).unwrap();

        let content = fs::read_to_string(store.classes_file()).unwrap();
        insta::assert_snapshot!(content, @r#"
        [
          "canción",
          "pájaro"
        ]
        "#);
    }

    #[test]
    fn rewrite_replaces_manual_edits() {
        let project = TempDir::new().unwrap();
        let store = ModelStore::for_project(project.path());
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.classes_file(), r#"["edited"]"#).unwrap();

        let resolution = LabelResolver::new("/definitely/not/here", FeatureCategory::ALL).resolve();
        write_labels(resolution, &store).unwrap();

        assert_eq!(read_written(&store).len(), 3);
    }

    #[test]
    fn preview_reports_elided_count() {
        let outcome = LabelOutcome {
            path: PathBuf::from("classes.json"),
            resolution: LabelResolution {
                labels: (1..=8).map(|i| format!("label_{}", i)).collect(),
                source: LabelSource::Placeholder,
                skipped: Vec::new(),
            },
        };

        let (shown, rest) = outcome.preview(5);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0], "label_1");
        assert_eq!(rest, 3);

        let (shown, rest) = outcome.preview(10);
        assert_eq!(shown.len(), 8);
        assert_eq!(rest, 0);
    }
}
