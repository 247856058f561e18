//! Labels command implementation.
//!
//! The `modelstage labels` command resolves class labels from the training
//! output and rewrites `models/classes.json` without copying anything else.

use crate::cli::args::LabelsArgs;
use crate::error::Result;
use crate::provision::{write_labels, LabelResolver, ModelStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{print_json, render_labels};

/// The labels command implementation.
pub struct LabelsCommand {
    context: CommandContext,
    args: LabelsArgs,
}

impl LabelsCommand {
    pub fn new(context: CommandContext, args: LabelsArgs) -> Self {
        Self { context, args }
    }
}

impl Command for LabelsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self
            .context
            .load_config_for(ui, self.args.source_root.as_deref())?;
        let source_root = config.resolved_source_root(&self.context.project_root)?;

        let resolution = LabelResolver::new(&source_root, &config.categories).resolve();
        let outcome = write_labels(
            resolution,
            &ModelStore::for_project(&self.context.project_root),
        )?;

        if self.args.json {
            print_json(ui, &outcome)?;
        } else {
            render_labels(ui, &outcome);
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelstageError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn labels(project: &TempDir, args: LabelsArgs, ui: &mut MockUI) -> Result<CommandResult> {
        LabelsCommand::new(CommandContext::new(project.path(), None), args).execute(ui)
    }

    #[test]
    fn requires_source_root() {
        let project = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let err = labels(&project, LabelsArgs::default(), &mut ui).unwrap_err();
        assert!(matches!(err, ModelstageError::SourceRootNotConfigured));
    }

    #[test]
    fn rewrites_classes_file_from_test_web() {
        let project = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        for label in ["rain", "dog", "siren"] {
            fs::create_dir_all(source.path().join("test_web").join(label)).unwrap();
        }
        let classes = project.path().join("models").join("classes.json");
        fs::create_dir_all(classes.parent().unwrap()).unwrap();
        fs::write(&classes, r#"["edited by hand"]"#).unwrap();
        let mut ui = MockUI::new();

        let args = LabelsArgs {
            source_root: Some(source.path().to_path_buf()),
            json: false,
        };
        labels(&project, args, &mut ui).unwrap();

        let written: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&classes).unwrap()).unwrap();
        assert_eq!(written, ["dog", "rain", "siren"]);
        assert!(ui.has_success("Classes found in test_web: 3"));
        assert!(!project.path().join("uploads").exists());
    }
}
