//! Config command implementation.
//!
//! The `modelstage config` command shows the resolved configuration, or the
//! JSON Schema of the config file with `--schema`.

use crate::cli::args::ConfigArgs;
use crate::config::{ConfigPaths, ModelstageConfig};
use crate::error::{ModelstageError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::print_json;

/// The config command implementation.
pub struct ConfigCommand {
    context: CommandContext,
    args: ConfigArgs,
}

impl ConfigCommand {
    pub fn new(context: CommandContext, args: ConfigArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(ModelstageConfig);
            print_json(ui, &schema)?;
            return Ok(CommandResult::success());
        }

        let config = self.context.load_config_for(ui, None)?;

        // Show config file path(s)
        let sources = match &self.context.config_path {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.context.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if !self.args.json {
            if sources.is_empty() {
                ui.message("# defaults (no config files found)");
            }
            for path in &sources {
                ui.message(&format!("# {}", path.display()));
            }
        }

        if self.args.json {
            print_json(ui, &config)?;
        } else {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| ModelstageError::Other(e.into()))?;
            ui.output(&yaml);
        }

        Ok(CommandResult::success())
    }
}
