//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands load
//! their own configuration so `completions` works outside a project.

pub mod check;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod labels;
pub mod run;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
