//! Provisioning orchestration.
//!
//! [`Pipeline`] runs the steps in order and collects a [`StepOutcome`]
//! for each; [`InterruptFlag`] lets Ctrl-C stop it between steps.

pub mod interrupt;
pub mod pipeline;

pub use interrupt::InterruptFlag;
pub use pipeline::{
    Pipeline, PipelineObserver, RunReport, RunStatus, SilentObserver, Step, StepOutcome,
};
