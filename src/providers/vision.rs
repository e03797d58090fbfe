//! Image label detection client.
//!
//! Submits image bytes to the deployment's label detection endpoint and
//! applies the food selection policy over the returned candidates. The
//! endpoint is region-scoped deployment configuration and authentication is
//! ambient to the deployment; the client attaches no credentials itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::LabelProvider;
use crate::types::{FoodLabel, LabelCandidate};
use crate::{AndhrimnirError, Result};

/// Maximum number of label candidates requested per detection call.
const MAX_LABELS: u32 = 1;

/// Minimum confidence (percent) a candidate must meet to be returned.
const MIN_CONFIDENCE: u32 = 70;

/// Client for the image label detection API.
#[derive(Clone)]
pub struct VisionClient {
    http: Client,
    base_url: String,
}

impl VisionClient {
    /// Create a client against the given detection endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Detect labels in an image and select a food label.
    ///
    /// Sends the raw image bytes with the candidate cap and confidence
    /// floor as query parameters, then applies [`select_food_label`] to
    /// whatever comes back.
    pub async fn detect(&self, image: &[u8]) -> Result<FoodLabel> {
        let url = format!("{}/v1/labels/detect", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[
                ("max_labels", MAX_LABELS.to_string()),
                ("min_confidence", MIN_CONFIDENCE.to_string()),
            ])
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AndhrimnirError::Api {
                status: status.as_u16(),
                message: format!("label detection API error: {}", status),
            });
        }

        let result: DetectResponse = response
            .json()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        select_food_label(&result.labels)
    }
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    labels: Vec<LabelCandidate>,
}

/// Select a specific food label from detection candidates.
///
/// Candidates are taken in returned order. A candidate is accepted when its
/// parent categories include one literally named "food" (case-insensitive)
/// and its own name does not itself restate "food" — that skips the generic
/// "Food" label when no more specific item was detected. The accepted name
/// is lowercased.
///
/// The rejection is a case-insensitive substring match, so e.g. "Fast Food"
/// is also skipped. Heuristic inherited as-is; an exact match may be the
/// better rule but would change observable selections.
pub fn select_food_label(candidates: &[LabelCandidate]) -> Result<FoodLabel> {
    for candidate in candidates {
        let has_food_parent = candidate
            .parents
            .iter()
            .any(|parent| parent.eq_ignore_ascii_case("food"));
        let restates_food = candidate.name.to_lowercase().contains("food");

        if has_food_parent && !restates_food {
            return FoodLabel::new(&candidate.name);
        }
    }
    Err(AndhrimnirError::NoFoodDetected)
}

#[async_trait]
impl LabelProvider for VisionClient {
    fn name(&self) -> &str {
        "vision"
    }

    async fn detect_food_label(&self, image: &[u8]) -> Result<FoodLabel> {
        self.detect(image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, parents: &[&str]) -> LabelCandidate {
        LabelCandidate {
            name: name.to_string(),
            confidence: 90.0,
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn skips_generic_food_label_for_specific_item() {
        let candidates = [
            candidate("Food", &["Food"]),
            candidate("Chicken", &["Food", "Meat"]),
        ];
        let label = select_food_label(&candidates).unwrap();
        assert_eq!(label.as_str(), "chicken");
    }

    #[test]
    fn accepts_first_qualifying_candidate() {
        let candidates = [
            candidate("Banana", &["Food", "Fruit"]),
            candidate("Chicken", &["Food", "Meat"]),
        ];
        let label = select_food_label(&candidates).unwrap();
        assert_eq!(label.as_str(), "banana");
    }

    #[test]
    fn food_parent_match_is_case_insensitive() {
        let candidates = [candidate("Banana", &["FOOD"])];
        assert_eq!(select_food_label(&candidates).unwrap().as_str(), "banana");
    }

    #[test]
    fn rejects_names_containing_food_substring() {
        let candidates = [candidate("Fast Food", &["Food"])];
        assert!(matches!(
            select_food_label(&candidates),
            Err(AndhrimnirError::NoFoodDetected)
        ));
    }

    #[test]
    fn no_food_ancestor_means_no_detection() {
        let candidates = [
            candidate("Table", &["Furniture"]),
            candidate("Plate", &["Tableware"]),
        ];
        assert!(matches!(
            select_food_label(&candidates),
            Err(AndhrimnirError::NoFoodDetected)
        ));
    }

    #[test]
    fn empty_candidates_means_no_detection() {
        assert!(matches!(
            select_food_label(&[]),
            Err(AndhrimnirError::NoFoodDetected)
        ));
    }
}
