//! Food label types produced by the detection service.

use serde::{Deserialize, Serialize};

use crate::{AndhrimnirError, Result};

/// A lowercase free-text food description, e.g. `"banana"`.
///
/// Produced by label detection, consumed as a food database search query.
/// Always non-empty and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodLabel(String);

impl FoodLabel {
    /// Create a label, lowercasing the input. Empty input is rejected.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let normalized = name.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AndhrimnirError::InvalidInput(
                "food label must be non-empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate returned by the label detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate {
    /// Candidate name, e.g. `"Chicken"`.
    pub name: String,
    /// Detection confidence, 0–100.
    pub confidence: f32,
    /// Parent category names, most specific last, e.g. `["Food", "Meat"]`.
    #[serde(default)]
    pub parents: Vec<String>,
}
