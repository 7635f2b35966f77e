//! Interaction intents for a tutoring turn.
//!
//! An intent is the declared purpose of one chat turn. It selects both the
//! system prompt sent to the model and the input affordance shown to the
//! learner.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Declared purpose of a single chat turn.
///
/// Serialized in kebab-case (`"deep-dive"`), matching the values the
/// interactive surface passes around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    Question,
    Quiz,
    Exercise,
    DeepDive,
}

impl Intent {
    /// Parse an intent, falling back to [`Intent::Question`] for anything
    /// unrecognized.
    ///
    /// Intent values are in-process state, not external input; an unknown
    /// value signals an internal inconsistency and fails closed to the
    /// default rather than erroring.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl Default for Intent {
    fn default() -> Self {
        Intent::Question
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Question => write!(f, "question"),
            Intent::Quiz => write!(f, "quiz"),
            Intent::Exercise => write!(f, "exercise"),
            Intent::DeepDive => write!(f, "deep-dive"),
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "question" => Ok(Intent::Question),
            "quiz" => Ok(Intent::Quiz),
            "exercise" => Ok(Intent::Exercise),
            "deep-dive" => Ok(Intent::DeepDive),
            other => Err(format!("invalid intent: '{other}'")),
        }
    }
}
