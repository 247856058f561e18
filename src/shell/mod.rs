//! External program execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{execute, execute_check, CommandResult};
pub use platform::is_ci;
