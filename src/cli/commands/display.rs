//! Rendering of step outcomes through the [`UserInterface`].
//!
//! Shared by `run` and the single-step commands so every outcome reads the
//! same wherever it is produced.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::provision::{
    CategoryCopyStatus, DocsReport, LabelOutcome, LabelSource, ProvisionReport, ScaffoldReport,
    VerifyReport,
};
use crate::requirements::{DependencyReport, RuntimeCheck, RuntimeStatus};
use crate::runner::{RunReport, RunStatus, StepOutcome};
use crate::ui::UserInterface;

/// Labels listed before the rest are summarized.
pub const LABEL_PREVIEW: usize = 5;

/// Render one pipeline outcome.
pub fn render_outcome(ui: &mut dyn UserInterface, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Runtime(check) => render_runtime(ui, check),
        StepOutcome::Scaffold(report) => render_scaffold(ui, report),
        StepOutcome::Provision(report) => render_provision(ui, report),
        StepOutcome::Labels(outcome) => render_labels(ui, outcome),
        StepOutcome::Verify(report) => render_verify(ui, report),
        StepOutcome::Docs(report) => render_docs(ui, report),
        StepOutcome::Dependencies(report) => render_dependencies(ui, report),
    }
}

pub fn render_runtime(ui: &mut dyn UserInterface, check: &RuntimeCheck) {
    match check.status {
        RuntimeStatus::Compatible { .. } => ui.success(&check.message()),
        RuntimeStatus::Skipped => ui.message(&check.message()),
        _ => ui.error(&check.message()),
    }
}

pub fn render_scaffold(ui: &mut dyn UserInterface, report: &ScaffoldReport) {
    for dir in &report.created {
        ui.success(&format!("Created directory: {}", dir_name(dir)));
    }
    if ui.output_mode().shows_details() {
        for dir in &report.existing {
            ui.message(&format!("  Already present: {}", dir_name(dir)));
        }
    }
    if report.created.is_empty() {
        ui.success("Project directories already in place");
    }
}

pub fn render_provision(ui: &mut dyn UserInterface, report: &ProvisionReport) {
    if !report.source_found {
        ui.error(&format!(
            "Training output not found: {}",
            report.source_root.display()
        ));
        ui.show_hint("Set source_root in .modelstage/config.yml or pass --source-root");
        return;
    }

    let details = ui.output_mode().shows_details();
    for copy in &report.categories {
        match &copy.status {
            CategoryCopyStatus::MissingSource { path } => {
                ui.warning(&format!(
                    "Category '{}' not found in {}",
                    copy.category,
                    path.display()
                ));
            }
            CategoryCopyStatus::Copied {
                models,
                models_dir_found,
                summary,
                fold_metrics,
            } => {
                if !models_dir_found {
                    ui.warning(&format!("{}: no models/ directory", copy.category));
                } else {
                    ui.success(&format!("{}: copied {} models", copy.category, models.len()));
                }
                if details {
                    for name in models {
                        ui.message(&format!("  -> {}", name));
                    }
                    if *summary {
                        ui.message("  -> summary.json");
                    }
                    if *fold_metrics {
                        ui.message("  -> fold_metrics.csv");
                    }
                }
            }
        }
    }

    if report.any_copied() {
        ui.success(&format!("Total models copied: {}", report.total_models()));
    } else {
        ui.warning("No models were copied. Check source_root");
    }
}

pub fn render_labels(ui: &mut dyn UserInterface, outcome: &LabelOutcome) {
    let resolution = &outcome.resolution;
    for skipped in &resolution.skipped {
        ui.warning(&format!(
            "Ignored {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }

    match &resolution.source {
        LabelSource::TestWeb { .. } => ui.success(&format!(
            "Classes found in test_web: {}",
            resolution.labels.len()
        )),
        LabelSource::Metadata { category, .. } => ui.success(&format!(
            "Classes found in {} metadata: {}",
            category,
            resolution.labels.len()
        )),
        LabelSource::Placeholder => {
            ui.warning("Could not extract class labels automatically");
            ui.warning(&format!(
                "Edit {} by hand before serving",
                outcome.path.display()
            ));
        }
    }

    ui.success(&format!("Wrote {}", outcome.path.display()));
    let (shown, rest) = outcome.preview(LABEL_PREVIEW);
    for (i, label) in shown.iter().enumerate() {
        ui.message(&format!("  {}. {}", i + 1, label));
    }
    if rest > 0 {
        ui.message(&format!("  ... and {} more", rest));
    }
}

pub fn render_verify(ui: &mut dyn UserInterface, report: &VerifyReport) {
    for check in &report.categories {
        match check.found {
            None => ui.warning(&format!(
                "{}: models directory missing: {}",
                check.category,
                check.models_dir.display()
            )),
            Some(found) if check.is_valid() => {
                ui.success(&format!("{}: {} models found", check.category, found))
            }
            Some(found) => ui.warning(&format!(
                "{}: only {}/{} models",
                check.category, found, check.expected
            )),
        }
    }
}

pub fn render_docs(ui: &mut dyn UserInterface, report: &DocsReport) {
    for path in &report.written {
        ui.success(&format!("Wrote {}", dir_name(path)));
    }
}

pub fn render_dependencies(ui: &mut dyn UserInterface, report: &DependencyReport) {
    for package in &report.packages {
        if package.available {
            ui.success(&package.name);
        } else {
            ui.warning(&format!("{} is not installed", package.name));
        }
    }
    if let Some(hint) = report.install_hint() {
        ui.show_hint(&format!("To install missing packages: {}", hint));
    }
}

/// Closing summary of a run.
pub fn render_summary(ui: &mut dyn UserInterface, report: &RunReport, interpreter: &str) {
    match report.status {
        RunStatus::Interrupted => {
            ui.warning("Setup interrupted by user");
        }
        RunStatus::Aborted => {
            ui.error("Setup aborted: the Python interpreter is not supported");
        }
        RunStatus::Completed => {
            ui.show_header("SETUP COMPLETE");

            let classes = report
                .labels()
                .map(|l| l.path.display().to_string())
                .unwrap_or_else(|| "models/classes.json".to_string());
            ui.message("Next steps:");
            ui.message("  1. Check or edit the class labels:");
            ui.message(&format!("       {}", classes));
            ui.message("  2. Install dependencies:");
            ui.message("       pip install -r requirements.txt");
            ui.message("  3. Start the server:");
            ui.message(&format!("       {} app.py", interpreter));
            ui.message("  4. Open the application:");
            ui.message("       http://localhost:8000");
        }
    }
}

/// Print a report as pretty JSON.
pub fn print_json<T: Serialize>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    ui.output(&json);
    Ok(())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::{CategoryCheck, FeatureCategory, LabelResolution, SkippedMetadata};
    use crate::requirements::{PackageCheck, RuntimeVersion};
    use crate::ui::{MockUI, OutputMode};
    use std::path::PathBuf;

    fn labels(names: &[&str], source: LabelSource) -> LabelOutcome {
        LabelOutcome {
            path: PathBuf::from("models/classes.json"),
            resolution: LabelResolution {
                labels: names.iter().map(|s| s.to_string()).collect(),
                source,
                skipped: Vec::new(),
            },
        }
    }

    #[test]
    fn label_preview_summarizes_the_rest() {
        let mut ui = MockUI::new();
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        render_labels(
            &mut ui,
            &labels(
                &names,
                LabelSource::TestWeb {
                    path: PathBuf::from("test_web"),
                },
            ),
        );

        assert!(ui.has_success("Classes found in test_web: 7"));
        assert!(ui.has_message("5. e"));
        assert!(!ui.has_message("6. f"));
        assert!(ui.has_message("... and 2 more"));
    }

    #[test]
    fn placeholder_labels_warn() {
        let mut ui = MockUI::new();
        let mut outcome = labels(
            &["clase_ejemplo_1", "clase_ejemplo_2", "clase_ejemplo_3"],
            LabelSource::Placeholder,
        );
        outcome.resolution.skipped.push(SkippedMetadata {
            category: FeatureCategory::Mfcc,
            path: PathBuf::from("mfcc/summary.json"),
            reason: "not JSON".to_string(),
        });

        render_labels(&mut ui, &outcome);

        assert!(ui.has_warning("Could not extract class labels"));
        assert!(ui.has_warning("mfcc/summary.json: not JSON"));
        assert!(!ui.has_message("more"));
    }

    #[test]
    fn missing_source_root_is_an_error_line_with_hint() {
        let mut ui = MockUI::new();
        let report = ProvisionReport {
            source_root: PathBuf::from("/nowhere"),
            source_found: false,
            categories: Vec::new(),
        };

        render_provision(&mut ui, &report);

        assert!(ui.has_error("/nowhere"));
        assert!(ui.has_hint("--source-root"));
    }

    #[test]
    fn model_names_only_in_verbose() {
        let report = ProvisionReport {
            source_root: PathBuf::from("/train"),
            source_found: true,
            categories: vec![crate::provision::CategoryCopy {
                category: FeatureCategory::Mel,
                status: CategoryCopyStatus::Copied {
                    models: vec!["fold_1.h5".to_string()],
                    models_dir_found: true,
                    summary: false,
                    fold_metrics: false,
                },
            }],
        };

        let mut normal = MockUI::new();
        render_provision(&mut normal, &report);
        assert!(normal.has_success("mel: copied 1 models"));
        assert!(!normal.has_message("fold_1.h5"));

        let mut verbose = MockUI::with_mode(OutputMode::Verbose);
        render_provision(&mut verbose, &report);
        assert!(verbose.has_message("-> fold_1.h5"));
    }

    #[test]
    fn verify_shortfall_warns() {
        let mut ui = MockUI::new();
        let report = VerifyReport {
            categories: vec![
                CategoryCheck {
                    category: FeatureCategory::Mfcc,
                    models_dir: PathBuf::from("models/mfcc/models"),
                    found: Some(5),
                    expected: 5,
                },
                CategoryCheck {
                    category: FeatureCategory::Mel,
                    models_dir: PathBuf::from("models/mel/models"),
                    found: Some(3),
                    expected: 5,
                },
            ],
        };

        render_verify(&mut ui, &report);

        assert!(ui.has_success("mfcc: 5 models found"));
        assert!(ui.has_warning("mel: only 3/5 models"));
    }

    #[test]
    fn missing_packages_get_install_hint() {
        let mut ui = MockUI::new();
        let report = DependencyReport {
            interpreter: "python3".to_string(),
            packages: vec![
                PackageCheck {
                    name: "numpy".to_string(),
                    available: true,
                },
                PackageCheck {
                    name: "librosa".to_string(),
                    available: false,
                },
            ],
        };

        render_dependencies(&mut ui, &report);

        assert!(ui.has_success("numpy"));
        assert!(ui.has_warning("librosa is not installed"));
        assert!(ui.has_hint("pip install librosa"));
    }

    #[test]
    fn skipped_runtime_is_plain_message() {
        let mut ui = MockUI::new();
        let check = RuntimeCheck::skipped("python3", RuntimeVersion::new(3, 8, 0));
        render_runtime(&mut ui, &check);
        assert!(ui.has_message("skipped"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn interrupted_summary() {
        let mut ui = MockUI::new();
        let report = RunReport {
            status: RunStatus::Interrupted,
            outcomes: Vec::new(),
        };
        render_summary(&mut ui, &report, "python3");
        assert!(ui.has_warning("Setup interrupted by user"));
        assert!(ui.headers().is_empty());
    }

    #[test]
    fn completed_summary_lists_next_steps() {
        let mut ui = MockUI::new();
        let report = RunReport {
            status: RunStatus::Completed,
            outcomes: Vec::new(),
        };
        render_summary(&mut ui, &report, "python3");
        assert_eq!(ui.headers(), ["SETUP COMPLETE"]);
        assert!(ui.has_message("pip install -r requirements.txt"));
        assert!(ui.has_message("python3 app.py"));
        assert!(ui.has_message("http://localhost:8000"));
    }
}
