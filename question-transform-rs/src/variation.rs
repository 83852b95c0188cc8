// question-transform-rs/src/variation.rs
//
// Variation kinds and the system prompts that define each transformation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const REPHRASE_PROMPT: &str = "You are an expert chemistry teacher. Rephrase the following IB Chemistry question using different wording while keeping the exact same meaning and difficulty level. Keep the multiple choice options if present. Only output the rephrased question, nothing else.";

const SIMPLIFY_PROMPT: &str = "You are an expert chemistry teacher. Create a simpler version of this IB Chemistry question that tests the same concept but is easier to understand. Use simpler language and provide clearer context. Keep the multiple choice format if present, but make options more straightforward. Only output the simplified question, nothing else.";

const ADVANCED_PROMPT: &str = "You are an expert chemistry teacher. Create a more challenging version of this IB Chemistry question. Add complexity by requiring deeper analysis, combining concepts, or requiring multi-step reasoning. Keep the multiple choice format if present. Only output the advanced question, nothing else.";

const SIMILAR_PROMPT: &str = "You are an expert chemistry teacher. Create a completely new question that tests the same chemistry concept/topic as the original but uses different numbers, molecules, or scenarios. Keep the same question format and difficulty level. Only output the new question, nothing else.";

/// The transformation a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationKind {
    /// Same meaning and difficulty, different wording
    #[default]
    Rephrase,
    /// Easier question on the same concept
    Simplify,
    /// Harder question on the same concept
    Advanced,
    /// New question on the same topic with different surface details
    Similar,
}

impl VariationKind {
    pub const ALL: [VariationKind; 4] = [
        VariationKind::Rephrase,
        VariationKind::Simplify,
        VariationKind::Advanced,
        VariationKind::Similar,
    ];

    /// Wire key for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariationKind::Rephrase => "rephrase",
            VariationKind::Simplify => "simplify",
            VariationKind::Advanced => "advanced",
            VariationKind::Similar => "similar",
        }
    }

    /// Resolve a caller-supplied key, falling back to [`VariationKind::Rephrase`]
    /// when the key is absent or not one of the recognized kinds.
    pub fn resolve(key: Option<&str>) -> Self {
        match key.map(str::parse::<VariationKind>) {
            Some(Ok(kind)) => kind,
            Some(Err(unknown)) => {
                log::debug!("{}; falling back to rephrase", unknown);
                VariationKind::default()
            }
            None => VariationKind::default(),
        }
    }

    /// System prompt sent to the model for this kind.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            VariationKind::Rephrase => REPHRASE_PROMPT,
            VariationKind::Simplify => SIMPLIFY_PROMPT,
            VariationKind::Advanced => ADVANCED_PROMPT,
            VariationKind::Similar => SIMILAR_PROMPT,
        }
    }

    /// Short human-readable summary, used by the service descriptor.
    pub fn description(&self) -> &'static str {
        match self {
            VariationKind::Rephrase => "Different wording, same meaning and difficulty",
            VariationKind::Simplify => "Easier version testing the same concept",
            VariationKind::Advanced => "Harder version requiring deeper or multi-step reasoning",
            VariationKind::Similar => "New question on the same topic with different details",
        }
    }
}

impl fmt::Display for VariationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a key names no known variation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariationKind(pub String);

impl fmt::Display for UnknownVariationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown variation kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownVariationKind {}

impl FromStr for VariationKind {
    type Err = UnknownVariationKind;

    // Keys are matched exactly; "Simplify" is not "simplify".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rephrase" => Ok(VariationKind::Rephrase),
            "simplify" => Ok(VariationKind::Simplify),
            "advanced" => Ok(VariationKind::Advanced),
            "similar" => Ok(VariationKind::Similar),
            other => Err(UnknownVariationKind(other.to_string())),
        }
    }
}
