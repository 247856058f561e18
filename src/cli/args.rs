//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Environment variable that supplies `--source-root`.
pub const SOURCE_ROOT_ENV: &str = "MODELSTAGE_SOURCE_ROOT";

/// modelstage - Provision the audio classifier web demo from training output.
#[derive(Debug, Parser)]
#[command(name = "modelstage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces .modelstage/config.yml and config.local.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the project (default if no command specified)
    Run(RunArgs),

    /// Count model files per category against the expected folds
    Verify(VerifyArgs),

    /// Resolve class labels and rewrite models/classes.json
    Labels(LabelsArgs),

    /// Check the Python interpreter and required packages
    Check(CheckArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Training output directory (overrides source_root in config)
    #[arg(long, value_name = "PATH", env = SOURCE_ROOT_ENV)]
    pub source_root: Option<PathBuf>,

    /// Do not check the Python version
    #[arg(long)]
    pub skip_runtime_check: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Defaults for a bare `modelstage` invocation, which clap does not
    /// parse into `RunArgs`.
    pub fn from_env() -> Self {
        Self {
            source_root: std::env::var_os(SOURCE_ROOT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ..Default::default()
        }
    }
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `labels` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LabelsArgs {
    /// Training output directory (overrides source_root in config)
    #[arg(long, value_name = "PATH", env = SOURCE_ROOT_ENV)]
    pub source_root: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with_all = ["yaml", "schema"])]
    pub json: bool,

    /// Output as YAML (default)
    #[arg(long, conflicts_with = "schema")]
    pub yaml: bool,

    /// Print the JSON Schema of the config file instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["modelstage"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "modelstage",
            "run",
            "--source-root",
            "/data/train",
            "--skip-runtime-check",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.source_root, Some(PathBuf::from("/data/train")));
                assert!(args.skip_runtime_check);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["modelstage", "verify", "-p", "/proj", "--quiet"]).unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("/proj")));
        assert!(cli.quiet);
    }

    #[test]
    fn config_format_flags_conflict() {
        assert!(Cli::try_parse_from(["modelstage", "config", "--json", "--yaml"]).is_err());
        assert!(Cli::try_parse_from(["modelstage", "config", "--json", "--schema"]).is_err());
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["modelstage", "completions"]).is_err());
        assert!(Cli::try_parse_from(["modelstage", "completions", "bash"]).is_ok());
    }
}
