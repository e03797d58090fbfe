//! Provider traits for the external services the pipeline depends on.
//!
//! The label detection service and the nutrition database are stateful,
//! rate-limited, credentialed remote systems. The pipeline only sees these
//! narrow contracts, so tests substitute fakes returning canned records
//! and the only logic worth testing stays isolated from the network.

use async_trait::async_trait;

use crate::Result;
use crate::types::{FoodId, FoodLabel, RawNutrientRecord};

/// Provider for image label detection.
#[async_trait]
pub trait LabelProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Detect the food depicted in an image.
    ///
    /// Returns `NoFoodDetected` when no returned candidate passes the food
    /// selection policy. Transport errors are fatal to the call; there is
    /// no retry.
    async fn detect_food_label(&self, image: &[u8]) -> Result<FoodLabel>;
}

/// Provider for food record resolution and nutrient lookup.
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Resolve a free-text food label to a canonical record id.
    ///
    /// Returns `FoodNotFound` when the search yields zero candidates.
    async fn resolve_label(&self, label: &FoodLabel) -> Result<FoodId>;

    /// Fetch the full, unfiltered nutrient list for a record.
    async fn fetch_nutrients(&self, id: FoodId) -> Result<RawNutrientRecord>;
}
