//! Nutrition estimation pipeline.
//!
//! The orchestrator behind one estimate request: image bytes and a mass in,
//! scaled nutrient totals out. Stages run strictly in sequence — each one's
//! input is the previous one's output — and the first failure ends the run;
//! partial results are not meaningful to the caller, so nothing is retried.
//!
//! # Pipeline Flow
//!
//! ```text
//! run(image, mass_grams)
//!         │ validate mass
//!         ▼
//! ┌──────────────────┐
//! │  LabelProvider   │ ──► image bytes → food label ("banana")
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ FoodDataProvider │ ──► label → record id → raw nutrient list
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │    extract       │ ──► protein + calories per 100g
//! └────────┬─────────┘
//!          ▼
//!   scale by mass/100 → NutrientEstimate
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::providers::traits::{FoodDataProvider, LabelProvider};
use crate::types::{MassGrams, NutrientEstimate};
use crate::{AndhrimnirError, extract, telemetry};

/// The stage a pipeline failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Mass validation, before any remote call.
    Input,
    /// Label detection against the vision service.
    Detection,
    /// Label → record id search against the food database.
    Resolution,
    /// Record id → nutrient list lookup.
    Fetch,
    /// Nutrient field selection from the fetched record.
    Extraction,
    /// Scaling the per-100g summary to the supplied mass.
    Calculation,
}

impl PipelineStage {
    /// Stage name used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Detection => "detection",
            Self::Resolution => "resolution",
            Self::Fetch => "fetch",
            Self::Extraction => "extraction",
            Self::Calculation => "calculation",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline failure, classified by stage with the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("pipeline failed at {stage}: {source}")]
pub struct PipelineError {
    /// The stage that failed.
    pub stage: PipelineStage,
    /// The classified cause.
    #[source]
    pub source: AndhrimnirError,
}

impl PipelineError {
    fn at(stage: PipelineStage, source: AndhrimnirError) -> Self {
        Self { stage, source }
    }
}

/// The identification-to-nutrient estimation pipeline.
///
/// Holds its providers behind [`Arc`]s so one pipeline serves concurrent
/// requests; invocations share no mutable state beyond the transport
/// layer's own connection pooling.
pub struct NutritionPipeline {
    detector: Arc<dyn LabelProvider>,
    food_data: Arc<dyn FoodDataProvider>,
}

impl NutritionPipeline {
    /// Create a pipeline over the given providers.
    pub fn new(detector: Arc<dyn LabelProvider>, food_data: Arc<dyn FoodDataProvider>) -> Self {
        Self {
            detector,
            food_data,
        }
    }

    /// Estimate the nutritional content of the pictured food at the given
    /// mass in grams.
    ///
    /// Runs the stage chain fail-fast; the returned [`PipelineError`] names
    /// the stage that ended the run. Identical inputs against identical
    /// provider responses yield identical estimates.
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn run(
        &self,
        image: &[u8],
        mass_grams: f64,
    ) -> std::result::Result<NutrientEstimate, PipelineError> {
        let start = Instant::now();
        let result = self.run_stages(image, mass_grams).await;

        match &result {
            Ok(estimate) => {
                Self::record_run(start, true);
                info!(
                    food = %estimate.food,
                    calories = estimate.calories_total,
                    protein = estimate.protein_total,
                    "estimate complete"
                );
            }
            Err(err) => {
                Self::record_run(start, false);
                metrics::counter!(telemetry::STAGE_FAILURES_TOTAL,
                    "stage" => err.stage.as_str(),
                )
                .increment(1);
                warn!(stage = %err.stage, error = %err.source, "pipeline failed");
            }
        }

        result
    }

    async fn run_stages(
        &self,
        image: &[u8],
        mass_grams: f64,
    ) -> std::result::Result<NutrientEstimate, PipelineError> {
        let mass = MassGrams::new(mass_grams)
            .map_err(|e| PipelineError::at(PipelineStage::Input, e))?;

        let label = self
            .detector
            .detect_food_label(image)
            .await
            .map_err(|e| PipelineError::at(PipelineStage::Detection, e))?;

        let id = self
            .food_data
            .resolve_label(&label)
            .await
            .map_err(|e| PipelineError::at(PipelineStage::Resolution, e))?;

        let record = self
            .food_data
            .fetch_nutrients(id)
            .await
            .map_err(|e| PipelineError::at(PipelineStage::Fetch, e))?;

        let summary = extract::extract(&record)
            .map_err(|e| PipelineError::at(PipelineStage::Extraction, e))?;

        // Per-100g basis: totals scale linearly with mass.
        let scale = mass.get() / 100.0;
        let calories_total = summary.calories_per_100g * scale;
        let protein_total = summary.protein_per_100g * scale;

        if !calories_total.is_finite() || !protein_total.is_finite() {
            return Err(PipelineError::at(
                PipelineStage::Calculation,
                AndhrimnirError::Calculation,
            ));
        }

        Ok(NutrientEstimate {
            food: label,
            calories_total,
            protein_total,
        })
    }

    /// Record run outcome metrics (counter + histogram).
    fn record_run(start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        let elapsed = start.elapsed().as_secs_f64();
        metrics::counter!(telemetry::RUNS_TOTAL, "status" => status).increment(1);
        metrics::histogram!(telemetry::RUN_DURATION_SECONDS, "status" => status).record(elapsed);
    }
}
