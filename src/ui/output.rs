//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status plus per-file detail.
    Verbose,
    /// Step progress and results.
    #[default]
    Normal,
    /// Results and warnings only.
    Quiet,
    /// Nothing except errors.
    Silent,
}

impl From<crate::config::OutputMode> for OutputMode {
    fn from(config_mode: crate::config::OutputMode) -> Self {
        match config_mode {
            crate::config::OutputMode::Verbose => Self::Verbose,
            crate::config::OutputMode::Normal => Self::Normal,
            crate::config::OutputMode::Quiet => Self::Quiet,
            crate::config::OutputMode::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Per-file detail such as each copied model.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Step headers and progress lines.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Results, warnings, and summaries.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
