//! External program execution.
//!
//! Programs are spawned directly (no shell) with captured output, so
//! package names and interpreter paths are never shell-interpreted.

use std::process::{Command, Stdio};

use crate::error::{ModelstageError, Result};

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Stdout and stderr joined, for tools that print to either.
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Run `program` with `args`, capturing stdout and stderr.
///
/// Returns `CommandFailed` with no exit code when the program cannot be
/// spawned at all (not installed, not executable).
pub fn execute(program: &str, args: &[&str]) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", program, e);
        ModelstageError::CommandFailed {
            command: display_command(program, args),
            code: None,
        }
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

/// Run a program and return whether it exited successfully.
///
/// Spawn failures count as failure.
pub fn execute_check(program: &str, args: &[&str]) -> bool {
    execute(program, args)
        .map(|r| r.success)
        .unwrap_or(false)
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_command_failed() {
        let err = execute("modelstage-no-such-program", &["--version"]).unwrap_err();
        match err {
            ModelstageError::CommandFailed { command, code } => {
                assert_eq!(command, "modelstage-no-such-program --version");
                assert!(code.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn execute_check_false_for_missing_program() {
        assert!(!execute_check("modelstage-no-such-program", &[]));
    }

    #[cfg(unix)]
    #[test]
    fn captures_exit_status() {
        let ok = execute("true", &[]).unwrap();
        assert!(ok.success);
        assert_eq!(ok.exit_code, Some(0));

        let failed = execute("false", &[]).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let result = execute("echo", &["Python", "3.11.4"]).unwrap();
        assert_eq!(result.stdout.trim(), "Python 3.11.4");
        assert!(result.combined_output().contains("3.11.4"));
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(display_command("python3", &[]), "python3");
        assert_eq!(
            display_command("python3", &["-c", "import flask"]),
            "python3 -c import flask"
        );
    }
}
