//! Project files written from templates embedded at compile time.

use include_dir::{include_dir, Dir};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModelstageError, Result};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Files written into the project root, in write order.
pub const PROJECT_DOCS: &[&str] = &["requirements.txt", "README.md"];

/// Outcome of [`write_project_docs`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocsReport {
    pub written: Vec<PathBuf>,
}

/// Contents of an embedded template.
pub fn template(name: &str) -> Result<&'static str> {
    TEMPLATES_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| anyhow::anyhow!("template '{}' is not embedded as UTF-8 text", name).into())
}

/// Write `requirements.txt` and `README.md`, replacing existing files.
pub fn write_project_docs(project_root: &Path) -> Result<DocsReport> {
    let mut report = DocsReport::default();

    for name in PROJECT_DOCS {
        let path = project_root.join(name);
        fs::write(&path, template(name)?).map_err(|e| ModelstageError::file_access(&path, e))?;
        report.written.push(path);
    }

    Ok(report)
}
