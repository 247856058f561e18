//! Check command implementation.
//!
//! The `modelstage check` command inspects the Python environment only:
//! interpreter version and package imports. Nothing is written.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::requirements::{check_packages, check_runtime, DependencyReport, RuntimeCheck};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{print_json, render_dependencies, render_runtime};

/// Both environment checks, for `--json`.
#[derive(Debug, Serialize)]
pub struct EnvironmentReport {
    pub runtime: RuntimeCheck,
    pub dependencies: DependencyReport,
}

impl EnvironmentReport {
    /// The interpreter is supported and every package imports.
    pub fn is_ready(&self) -> bool {
        self.runtime.is_compatible() && self.dependencies.all_available()
    }
}

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(context: CommandContext, args: CheckArgs) -> Self {
        Self { context, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config_for(ui, None)?;
        let interpreter = &config.runtime.interpreter;
        let minimum = config.minimum_version()?;

        let runtime = if config.runtime.check {
            check_runtime(interpreter, minimum)
        } else {
            RuntimeCheck::skipped(interpreter, minimum)
        };
        let dependencies = check_packages(interpreter, &config.packages);
        let report = EnvironmentReport {
            runtime,
            dependencies,
        };

        if self.args.json {
            print_json(ui, &report)?;
        } else {
            render_runtime(ui, &report.runtime);
            render_dependencies(ui, &report.dependencies);
            if report.is_ready() {
                ui.success("Python environment is ready");
            }
        }

        if report.is_ready() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
