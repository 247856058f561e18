//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands
//! - [`CommandContext`] for the project root and config every command shares

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, validate, ModelstageConfig};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds its project and configuration.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_root: PathBuf,
    /// `--config`, replacing the project config files.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: &Path, config_path: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
        }
    }

    /// Load and validate the config, applying a `--source-root` override.
    pub fn load_config(&self, source_root: Option<&Path>) -> Result<ModelstageConfig> {
        let mut config = load_config(&self.project_root, self.config_path.as_deref())?;
        if let Some(root) = source_root {
            tracing::debug!("Source root overridden: {}", root.display());
            config.source_root = Some(root.to_path_buf());
        }
        validate(&config)?;
        Ok(config)
    }

    /// Load the config and let `settings.default_output` apply when no
    /// output flag was given.
    pub fn load_config_for(
        &self,
        ui: &mut dyn UserInterface,
        source_root: Option<&Path>,
    ) -> Result<ModelstageConfig> {
        let config = self.load_config(source_root)?;
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }
        Ok(config)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: CommandContext {
                project_root,
                config_path: None,
            },
        }
    }

    /// Use an explicit config file.
    pub fn with_config(mut self, config_path: Option<PathBuf>) -> Self {
        self.context.config_path = config_path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = self.context.clone();
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Verify(args)) => {
                super::verify::VerifyCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Labels(args)) => {
                super::labels::LabelsCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::run::RunCommand::new(context, RunArgs::from_env()).execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelstageError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_config(content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".modelstage");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
        temp
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn source_root_override_wins() {
        let temp = project_with_config("source_root: /from/config");
        let context = CommandContext::new(temp.path(), None);

        let config = context.load_config(Some(Path::new("/from/flag"))).unwrap();

        assert_eq!(config.source_root, Some(PathBuf::from("/from/flag")));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let temp = project_with_config("expected_folds: 0");
        let context = CommandContext::new(temp.path(), None);

        let err = context.load_config(None).unwrap_err();

        assert!(matches!(err, ModelstageError::ConfigValidationError { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn default_output_applies_only_without_flag() {
        let temp = project_with_config("settings:\n  default_output: quiet");
        let context = CommandContext::new(temp.path(), None);

        let mut normal = MockUI::new();
        context.load_config_for(&mut normal, None).unwrap();
        assert_eq!(normal.output_mode(), OutputMode::Quiet);

        let mut verbose = MockUI::with_mode(OutputMode::Verbose);
        context.load_config_for(&mut verbose, None).unwrap();
        assert_eq!(verbose.output_mode(), OutputMode::Verbose);
    }
}
