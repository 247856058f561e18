//! Configuration validation rules.
//!
//! - At least one category, no duplicates
//! - Model extension non-empty, without a leading dot
//! - Expected fold count above zero
//! - Interpreter set, minimum version parseable
//! - Package names are Python import paths

use crate::config::schema::ModelstageConfig;
use crate::error::{ModelstageError, Result};
use crate::requirements::packages::is_valid_import_name;
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ModelstageConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.categories.is_empty() {
        errors.push(ValidationError::new(
            "no-categories",
            "'categories' must list at least one feature category",
        ));
    }
    let mut seen = HashSet::new();
    for category in &config.categories {
        if !seen.insert(category) {
            errors.push(ValidationError::new(
                "duplicate-category",
                format!("Category '{}' is listed more than once", category),
            ));
        }
    }

    let ext = config.model_extension.as_str();
    if ext.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-extension",
            "'model_extension' must not be empty",
        ));
    } else if ext.trim() != ext {
        errors.push(ValidationError::new(
            "padded-extension",
            format!(
                "'model_extension' must not have surrounding whitespace: '{}'",
                ext
            ),
        ));
    } else if ext.starts_with('.') {
        errors.push(ValidationError::new(
            "dotted-extension",
            format!(
                "'model_extension' should be given without the dot: '{}'",
                ext.trim_start_matches('.')
            ),
        ));
    }

    if config.expected_folds == 0 {
        errors.push(ValidationError::new(
            "zero-folds",
            "'expected_folds' must be at least 1",
        ));
    }

    if config.runtime.interpreter.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-interpreter",
            "'runtime.interpreter' must not be empty",
        ));
    }
    if let Err(e) = config.minimum_version() {
        errors.push(ValidationError::new("invalid-version", e.to_string()));
    }

    for package in &config.packages {
        if !is_valid_import_name(package) {
            errors.push(ValidationError::new(
                "invalid-package",
                format!("Package '{}' is not a Python import name", package),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with all messages joined.
pub fn validate(config: &ModelstageConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ModelstageError::ConfigValidationError { message })
}
