//! Run command implementation.
//!
//! The `modelstage run` command executes the whole provisioning pipeline.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::runner::{
    InterruptFlag, Pipeline, PipelineObserver, RunStatus, SilentObserver, Step, StepOutcome,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{print_json, render_outcome, render_summary};

/// Renders pipeline progress as it happens.
struct UiObserver<'a> {
    ui: &'a mut dyn UserInterface,
}

impl PipelineObserver for UiObserver<'_> {
    fn step_started(&mut self, step: Step, index: usize, total: usize) {
        self.ui.show_step(index, total, step.description());
    }

    fn step_finished(&mut self, outcome: &StepOutcome) {
        render_outcome(self.ui, outcome);
    }
}

/// The run command implementation.
pub struct RunCommand {
    context: CommandContext,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(context: CommandContext, args: RunArgs) -> Self {
        Self { context, args }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self
            .context
            .load_config_for(ui, self.args.source_root.as_deref())?;

        let mut pipeline = Pipeline::from_config(&self.context.project_root, &config)?;
        if self.args.skip_runtime_check {
            pipeline = pipeline.skip_runtime_check();
        }
        tracing::debug!(
            "Provisioning {} from {}",
            self.context.project_root.display(),
            pipeline.source_root().display()
        );

        let interrupt = InterruptFlag::install();

        let report = if self.args.json {
            let report = pipeline.run(&interrupt, &mut SilentObserver)?;
            print_json(ui, &report)?;
            report
        } else {
            ui.show_header("AUDIO CLASSIFIER SETUP");
            let report = pipeline.run(&interrupt, &mut UiObserver { ui: &mut *ui })?;
            render_summary(ui, &report, &config.runtime.interpreter);
            report
        };

        tracing::debug!("Run finished: {:?}", report.status);
        Ok(match report.status {
            RunStatus::Aborted => CommandResult::failure(report.exit_code()),
            RunStatus::Completed | RunStatus::Interrupted => CommandResult::success(),
        })
    }
}
