//! Verify command implementation.
//!
//! The `modelstage verify` command counts the models already in the project.

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::provision::{ModelStore, ModelVerifier};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{print_json, render_verify};

/// The verify command implementation.
pub struct VerifyCommand {
    context: CommandContext,
    args: VerifyArgs,
}

impl VerifyCommand {
    pub fn new(context: CommandContext, args: VerifyArgs) -> Self {
        Self { context, args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config_for(ui, None)?;
        let store = ModelStore::for_project(&self.context.project_root);

        let report = ModelVerifier::new(
            store.root(),
            &config.model_extension,
            config.expected_folds,
        )
        .verify(&config.categories);

        if self.args.json {
            print_json(ui, &report)?;
        } else {
            render_verify(ui, &report);
            if report.all_valid() {
                ui.success("All models verified");
            }
        }

        // Unlike `run`, a shortfall fails this command so scripts can gate on it.
        if report.all_valid() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
