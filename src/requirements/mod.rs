//! Checks against the Python environment the demo will run in.
//!
//! # Modules
//!
//! - [`runtime`] - Interpreter version check (fatal when it fails)
//! - [`packages`] - Import check for required packages (advisory)

pub mod packages;
pub mod runtime;

pub use packages::{
    check_packages, check_packages_until, DependencyReport, PackageCheck, DEFAULT_PACKAGES,
};
pub use runtime::{check_runtime, RuntimeCheck, RuntimeStatus, RuntimeVersion};
