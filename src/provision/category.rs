//! Feature categories the demo ships an ensemble for.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An audio-feature representation with its own k-fold model ensemble.
///
/// The set is closed: the training pipeline only produces these three.
/// [`FeatureCategory::ALL`] is the one list every component iterates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    /// MFCC-based features.
    Mfcc,
    /// Mel-spectrogram features.
    Mel,
    /// MFCC and mel features concatenated.
    Concat,
}

impl FeatureCategory {
    /// All categories in declaration order.
    ///
    /// Label resolution falls back to metadata in this order, so the first
    /// entry wins when several categories carry a `classes` field.
    pub const ALL: &'static [FeatureCategory] = &[Self::Mfcc, Self::Mel, Self::Concat];

    /// Directory name used in both the source tree and the model store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mfcc => "mfcc",
            Self::Mel => "mel",
            Self::Concat => "concat",
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mfcc" => Ok(Self::Mfcc),
            "mel" => Ok(Self::Mel),
            "concat" => Ok(Self::Concat),
            _ => Err(format!("unknown feature category: {}", s)),
        }
    }
}
