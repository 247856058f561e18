//! Command-line interface for modelstage.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, ConfigArgs, LabelsArgs, RunArgs, VerifyArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
