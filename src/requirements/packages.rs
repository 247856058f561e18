//! Python package availability check.
//!
//! Each package is imported in a fresh interpreter. Nothing is installed;
//! the report carries a `pip install` line for whatever is missing.

use serde::Serialize;

use crate::shell;

/// Packages the demo backend imports.
pub const DEFAULT_PACKAGES: &[&str] = &["flask", "tensorflow", "librosa", "numpy", "pandas"];

/// Availability of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCheck {
    pub name: String,
    pub available: bool,
}

/// Outcome of [`check_packages`].
#[derive(Debug, Clone, Serialize)]
pub struct DependencyReport {
    pub interpreter: String,
    pub packages: Vec<PackageCheck>,
}

impl DependencyReport {
    /// Names of packages that failed to import, in check order.
    pub fn missing(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| !p.available)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// True when every package imported.
    pub fn all_available(&self) -> bool {
        self.packages.iter().all(|p| p.available)
    }

    /// `pip install ...` for the missing packages, if any.
    pub fn install_hint(&self) -> Option<String> {
        let missing = self.missing();
        if missing.is_empty() {
            None
        } else {
            Some(format!("pip install {}", missing.join(" ")))
        }
    }
}

/// Try `<interpreter> -c "import <name>"` for every package.
///
/// A missing interpreter makes every package count as missing.
pub fn check_packages<S: AsRef<str>>(interpreter: &str, packages: &[S]) -> DependencyReport {
    check_packages_until(interpreter, packages, || false)
}

/// [`check_packages`], stopping before the next package once `stop` is true.
///
/// Packages that were never tried are left out of the report.
pub fn check_packages_until<S, F>(interpreter: &str, packages: &[S], stop: F) -> DependencyReport
where
    S: AsRef<str>,
    F: Fn() -> bool,
{
    let packages = packages
        .iter()
        .take_while(|_| !stop())
        .map(|name| {
            let name = name.as_ref();
            let statement = format!("import {}", name);
            let available = shell::execute_check(interpreter, &["-c", &statement]);
            tracing::debug!("Package {}: available={}", name, available);
            PackageCheck {
                name: name.to_string(),
                available,
            }
        })
        .collect();

    DependencyReport {
        interpreter: interpreter.to_string(),
        packages,
    }
}

/// Whether `name` is a dotted Python module path.
///
/// Package names end up in `-c "import ..."`, so anything else is rejected
/// at config validation.
pub fn is_valid_import_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
