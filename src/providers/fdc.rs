//! USDA FoodData Central client for food search and nutrient lookup.
//!
//! See: <https://fdc.nal.usda.gov/api-guide.html>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::FoodDataProvider;
use crate::types::{FoodId, FoodLabel, NutrientEntry, RawNutrientRecord};
use crate::{AndhrimnirError, Result};

/// Default base URL for the FoodData Central API.
const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc";

/// Dataset restricted in searches. Foundation records carry the per-100g
/// analytical values the extractor expects.
const SEARCH_DATA_TYPE: &str = "Foundation";

/// Client for the FoodData Central REST API.
///
/// Supports:
/// - Food search (label → record id)
/// - Food detail (record id → nutrient list)
///
/// Authentication is a caller-held API key passed as a query parameter.
#[derive(Clone)]
pub struct FdcClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl FdcClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        }
    }

    /// Search for a food by label and return the top-ranked record id.
    ///
    /// Requests a single page of a single result restricted to the
    /// Foundation dataset and accepts whatever the search ranks first.
    /// Known limitation: there is no relevance or confidence check on that
    /// first result, so a poor label can resolve to the wrong record.
    pub async fn search_food(&self, label: &FoodLabel) -> Result<FoodId> {
        let url = format!("{}/v1/foods/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", label.as_str()),
                ("dataType", SEARCH_DATA_TYPE),
                ("pageSize", "1"),
                ("pageNumber", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        self.handle_response_errors(&response)?;

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        result
            .foods
            .into_iter()
            .next()
            .map(|food| FoodId(food.fdc_id))
            .ok_or_else(|| AndhrimnirError::FoodNotFound(label.to_string()))
    }

    /// Fetch the full nutrient list for a record.
    ///
    /// The list is returned unfiltered; field selection is the caller's
    /// concern. Entries the database reports without an amount are dropped.
    pub async fn food_nutrients(&self, id: FoodId) -> Result<RawNutrientRecord> {
        let url = format!("{}/v1/food/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        self.handle_response_errors(&response)?;

        let result: FoodDetailResponse = response
            .json()
            .await
            .map_err(|e| AndhrimnirError::Http(e.to_string()))?;

        let entries = result
            .food_nutrients
            .into_iter()
            .filter_map(|entry| {
                entry.amount.map(|amount| NutrientEntry {
                    nutrient_id: entry.nutrient.id,
                    amount,
                })
            })
            .collect();

        Ok(RawNutrientRecord { entries })
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 | 403 => Err(AndhrimnirError::AuthenticationFailed),
            code => Err(AndhrimnirError::Api {
                status: code,
                message: format!("FoodData Central API error: {}", status),
            }),
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Deserialize)]
struct SearchFood {
    #[serde(rename = "fdcId")]
    fdc_id: i64,
}

#[derive(Deserialize)]
struct FoodDetailResponse {
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Deserialize)]
struct FoodNutrient {
    nutrient: NutrientRef,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Deserialize)]
struct NutrientRef {
    id: u32,
}

#[async_trait]
impl FoodDataProvider for FdcClient {
    fn name(&self) -> &str {
        "fdc"
    }

    async fn resolve_label(&self, label: &FoodLabel) -> Result<FoodId> {
        self.search_food(label).await
    }

    async fn fetch_nutrients(&self, id: FoodId) -> Result<RawNutrientRecord> {
        self.food_nutrients(id).await
    }
}
