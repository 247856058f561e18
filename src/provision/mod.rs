//! Workspace provisioning: scaffold, model copy, labels, verification.
//!
//! Every component takes the category list as a parameter and returns a
//! structured report; nothing here writes to the terminal.
//!
//! # Modules
//!
//! - [`category`] - The closed set of feature categories
//! - [`layout`] - Scaffold directories and model store paths
//! - [`copy`] - Copying ensembles and metadata from the training output
//! - [`labels`] - Class label discovery and `classes.json`
//! - [`verify`] - Model count verification
//! - [`docs`] - `requirements.txt` and `README.md`

pub mod category;
pub mod copy;
pub mod docs;
pub mod labels;
pub mod layout;
pub mod verify;

pub use category::FeatureCategory;
pub use copy::{CategoryCopy, CategoryCopyStatus, ModelProvisioner, ProvisionReport};
pub use docs::{write_project_docs, DocsReport};
pub use labels::{
    write_labels, LabelOutcome, LabelResolution, LabelResolver, LabelSource, SkippedMetadata,
    PLACEHOLDER_LABELS,
};
pub use layout::{ensure_structure, ModelStore, ScaffoldReport, SCAFFOLD_DIRS};
pub use verify::{CategoryCheck, ModelVerifier, VerifyReport, DEFAULT_EXPECTED_FOLDS};
