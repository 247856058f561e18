//! Python interpreter version check.
//!
//! The demo backend runs on Python, so the interpreter it will use is the
//! runtime that has to be recent enough. This is the only check that stops
//! a run.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::shell;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
});

/// A `major.minor[.patch]` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first version number from `--version` output.
    ///
    /// Python 2 prints to stderr and some builds append a suffix
    /// (`Python 3.12.0rc1`), so this searches rather than matching exactly.
    pub fn from_output(output: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(output)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    /// Same major version and not older than `minimum`.
    pub fn satisfies(&self, minimum: &RuntimeVersion) -> bool {
        self.major == minimum.major && self >= minimum
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for RuntimeVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(format!("expected MAJOR.MINOR[.PATCH], got '{}'", s));
        }
        let num = |p: &str| {
            p.parse::<u32>()
                .map_err(|_| format!("invalid version component '{}' in '{}'", p, s))
        };
        Ok(Self::new(
            num(parts[0])?,
            num(parts[1])?,
            parts.get(2).map(|p| num(*p)).transpose()?.unwrap_or(0),
        ))
    }
}

impl Serialize for RuntimeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How the interpreter check ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuntimeStatus {
    /// Version found and recent enough.
    Compatible { version: RuntimeVersion },
    /// Version found but too old or a different major version.
    Incompatible { version: RuntimeVersion },
    /// The interpreter ran but printed no recognizable version.
    Unrecognized { output: String },
    /// The interpreter could not be started.
    NotFound,
    /// The check was disabled.
    Skipped,
}

/// Outcome of [`check_runtime`].
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeCheck {
    pub interpreter: String,
    pub minimum: RuntimeVersion,
    #[serde(flatten)]
    pub status: RuntimeStatus,
}

impl RuntimeCheck {
    /// A skipped check, reported as passing.
    pub fn skipped(interpreter: &str, minimum: RuntimeVersion) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            minimum,
            status: RuntimeStatus::Skipped,
        }
    }

    /// Whether the run may continue.
    pub fn is_compatible(&self) -> bool {
        matches!(
            self.status,
            RuntimeStatus::Compatible { .. } | RuntimeStatus::Skipped
        )
    }

    /// One-line description of the result.
    pub fn message(&self) -> String {
        let required = format!("{}.{}+", self.minimum.major, self.minimum.minor);
        match &self.status {
            RuntimeStatus::Compatible { version } => format!("Python {}", version),
            RuntimeStatus::Incompatible { version } => format!(
                "Python {}.{} is not supported, requires Python {}",
                version.major, version.minor, required
            ),
            RuntimeStatus::Unrecognized { output } => format!(
                "Could not read a version from '{} --version' (output: {})",
                self.interpreter,
                output.trim()
            ),
            RuntimeStatus::NotFound => format!(
                "Interpreter '{}' not found, requires Python {}",
                self.interpreter, required
            ),
            RuntimeStatus::Skipped => "Runtime check skipped".to_string(),
        }
    }
}

/// Run `<interpreter> --version` and compare against `minimum`.
pub fn check_runtime(interpreter: &str, minimum: RuntimeVersion) -> RuntimeCheck {
    let status = match shell::execute(interpreter, &["--version"]) {
        Err(_) => RuntimeStatus::NotFound,
        Ok(result) => {
            tracing::debug!("{} --version exited with {:?}", interpreter, result.exit_code);
            let output = result.combined_output();
            match RuntimeVersion::from_output(&output) {
                Some(version) if version.satisfies(&minimum) => {
                    RuntimeStatus::Compatible { version }
                }
                Some(version) => RuntimeStatus::Incompatible { version },
                None => RuntimeStatus::Unrecognized { output },
            }
        }
    };

    tracing::debug!("Runtime check for {}: {:?}", interpreter, status);
    RuntimeCheck {
        interpreter: interpreter.to_string(),
        minimum,
        status,
    }
}
