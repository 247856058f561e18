//! The provisioning pipeline.
//!
//! Steps run in a fixed order and each produces a [`StepOutcome`]. Only an
//! incompatible interpreter stops the run; every other negative outcome is
//! recorded and the next step runs anyway. Unexpected I/O errors propagate.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ModelstageConfig;
use crate::error::Result;
use crate::provision::{
    ensure_structure, write_labels, write_project_docs, DocsReport, FeatureCategory,
    LabelOutcome, LabelResolver, ModelProvisioner, ModelStore, ModelVerifier, ProvisionReport,
    ScaffoldReport, VerifyReport,
};
use crate::requirements::{
    check_packages_until, check_runtime, DependencyReport, RuntimeCheck, RuntimeVersion,
};

use super::interrupt::InterruptFlag;

/// Pipeline steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Runtime,
    Scaffold,
    Provision,
    Labels,
    Verify,
    Docs,
    Dependencies,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: &'static [Step] = &[
        Self::Runtime,
        Self::Scaffold,
        Self::Provision,
        Self::Labels,
        Self::Verify,
        Self::Docs,
        Self::Dependencies,
    ];

    /// Progress line shown when the step starts.
    pub fn description(self) -> &'static str {
        match self {
            Self::Runtime => "Checking Python version",
            Self::Scaffold => "Creating project directories",
            Self::Provision => "Copying trained models",
            Self::Labels => "Writing class labels",
            Self::Verify => "Verifying models",
            Self::Docs => "Writing requirements.txt and README.md",
            Self::Dependencies => "Checking Python packages",
        }
    }
}

/// Result of one pipeline step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepOutcome {
    Runtime(RuntimeCheck),
    Scaffold(ScaffoldReport),
    Provision(ProvisionReport),
    Labels(LabelOutcome),
    Verify(VerifyReport),
    Docs(DocsReport),
    Dependencies(DependencyReport),
}

impl StepOutcome {
    /// The step that produced this outcome.
    pub fn step(&self) -> Step {
        match self {
            Self::Runtime(_) => Step::Runtime,
            Self::Scaffold(_) => Step::Scaffold,
            Self::Provision(_) => Step::Provision,
            Self::Labels(_) => Step::Labels,
            Self::Verify(_) => Step::Verify,
            Self::Docs(_) => Step::Docs,
            Self::Dependencies(_) => Step::Dependencies,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every step ran.
    Completed,
    /// The runtime check failed; nothing else ran.
    Aborted,
    /// Ctrl-C between steps.
    Interrupted,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Completed | RunStatus::Interrupted => 0,
            RunStatus::Aborted => 1,
        }
    }

    pub fn runtime(&self) -> Option<&RuntimeCheck> {
        self.outcomes.iter().find_map(|o| match o {
            StepOutcome::Runtime(r) => Some(r),
            _ => None,
        })
    }

    pub fn provision(&self) -> Option<&ProvisionReport> {
        self.outcomes.iter().find_map(|o| match o {
            StepOutcome::Provision(r) => Some(r),
            _ => None,
        })
    }

    pub fn labels(&self) -> Option<&LabelOutcome> {
        self.outcomes.iter().find_map(|o| match o {
            StepOutcome::Labels(r) => Some(r),
            _ => None,
        })
    }

    pub fn verify(&self) -> Option<&VerifyReport> {
        self.outcomes.iter().find_map(|o| match o {
            StepOutcome::Verify(r) => Some(r),
            _ => None,
        })
    }

    pub fn dependencies(&self) -> Option<&DependencyReport> {
        self.outcomes.iter().find_map(|o| match o {
            StepOutcome::Dependencies(r) => Some(r),
            _ => None,
        })
    }
}

/// Receives pipeline progress; the CLI renders through this.
pub trait PipelineObserver {
    /// Called before a step runs.
    fn step_started(&mut self, _step: Step, _index: usize, _total: usize) {}

    /// Called with each step's outcome.
    fn step_finished(&mut self, outcome: &StepOutcome);
}

/// Observer that ignores everything.
pub struct SilentObserver;

impl PipelineObserver for SilentObserver {
    fn step_finished(&mut self, _outcome: &StepOutcome) {}
}

/// Resolved inputs of a run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    project_root: PathBuf,
    source_root: PathBuf,
    categories: Vec<FeatureCategory>,
    model_extension: String,
    expected_folds: usize,
    interpreter: String,
    minimum_version: RuntimeVersion,
    check_runtime: bool,
    packages: Vec<String>,
}

impl Pipeline {
    /// Build a pipeline from validated config.
    ///
    /// Fails when no source root is configured or the minimum version
    /// does not parse.
    pub fn from_config(project_root: &Path, config: &ModelstageConfig) -> Result<Self> {
        Ok(Self {
            project_root: project_root.to_path_buf(),
            source_root: config.resolved_source_root(project_root)?,
            categories: config.categories.clone(),
            model_extension: config.model_extension.clone(),
            expected_folds: config.expected_folds,
            interpreter: config.runtime.interpreter.clone(),
            minimum_version: config.minimum_version()?,
            check_runtime: config.runtime.check,
            packages: config.packages.clone(),
        })
    }

    /// Disable the interpreter version check.
    pub fn skip_runtime_check(mut self) -> Self {
        self.check_runtime = false;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn categories(&self) -> &[FeatureCategory] {
        &self.categories
    }

    fn store(&self) -> ModelStore {
        ModelStore::for_project(&self.project_root)
    }

    /// Run every step, reporting to `observer` as it goes.
    pub fn run(
        &self,
        interrupt: &InterruptFlag,
        observer: &mut dyn PipelineObserver,
    ) -> Result<RunReport> {
        let mut outcomes = Vec::with_capacity(Step::ALL.len());
        let total = Step::ALL.len();

        for (index, &step) in Step::ALL.iter().enumerate() {
            if interrupt.is_set() {
                tracing::debug!("Interrupted before {:?}", step);
                return Ok(RunReport {
                    status: RunStatus::Interrupted,
                    outcomes,
                });
            }

            observer.step_started(step, index + 1, total);
            let outcome = self.run_step(step, interrupt)?;
            observer.step_finished(&outcome);

            // Ctrl-C during a step wins over whatever the step concluded.
            let status = if interrupt.is_set() {
                Some(RunStatus::Interrupted)
            } else if matches!(&outcome, StepOutcome::Runtime(check) if !check.is_compatible()) {
                Some(RunStatus::Aborted)
            } else {
                None
            };
            outcomes.push(outcome);
            if let Some(status) = status {
                tracing::debug!("Stopping after {:?}: {:?}", step, status);
                return Ok(RunReport { status, outcomes });
            }
        }

        Ok(RunReport {
            status: RunStatus::Completed,
            outcomes,
        })
    }

    /// Run a single step. Only the dependency check watches `interrupt`
    /// itself, since it spawns one interpreter per package.
    pub fn run_step(&self, step: Step, interrupt: &InterruptFlag) -> Result<StepOutcome> {
        let store = self.store();
        let outcome = match step {
            Step::Runtime => StepOutcome::Runtime(self.runtime_check()),
            Step::Scaffold => StepOutcome::Scaffold(ensure_structure(&self.project_root)?),
            Step::Provision => StepOutcome::Provision(
                ModelProvisioner::new(&self.source_root, store, &self.model_extension)
                    .provision(&self.categories)?,
            ),
            Step::Labels => {
                let resolution = LabelResolver::new(&self.source_root, &self.categories).resolve();
                StepOutcome::Labels(write_labels(resolution, &store)?)
            }
            Step::Verify => StepOutcome::Verify(
                ModelVerifier::new(store.root(), &self.model_extension, self.expected_folds)
                    .verify(&self.categories),
            ),
            Step::Docs => StepOutcome::Docs(write_project_docs(&self.project_root)?),
            Step::Dependencies => StepOutcome::Dependencies(check_packages_until(
                &self.interpreter,
                &self.packages,
                || interrupt.is_set(),
            )),
        };
        Ok(outcome)
    }

    /// The interpreter check, or a skipped record when disabled.
    pub fn runtime_check(&self) -> RuntimeCheck {
        if self.check_runtime {
            check_runtime(&self.interpreter, self.minimum_version)
        } else {
            RuntimeCheck::skipped(&self.interpreter, self.minimum_version)
        }
    }
}
