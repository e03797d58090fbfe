//! Andhrimnir - Photo-to-nutrition estimation service
//!
//! This crate estimates the nutritional content (calories, protein) of a
//! food item from a photograph and a measured mass. One pipeline drives
//! three external lookups in sequence: detect the food depicted in the
//! image, resolve that label to a record in the USDA FoodData Central
//! database, and fetch the record's per-100g nutrient values to scale by
//! the supplied mass.
//!
//! The remote services sit behind the narrow [`LabelProvider`] and
//! [`FoodDataProvider`] traits, so the pipeline can be exercised with
//! substitutable fakes in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use andhrimnir::NutritionPipeline;
//! use andhrimnir::providers::{FdcClient, VisionClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = NutritionPipeline::new(
//!         Arc::new(VisionClient::new("https://vision.internal.example")),
//!         Arc::new(FdcClient::new("your-fdc-api-key")),
//!     );
//!
//!     let image = std::fs::read("banana.jpg").unwrap();
//!     match pipeline.run(&image, 150.0).await {
//!         Ok(estimate) => println!(
//!             "{}: {:.1} kcal, {:.1} g protein",
//!             estimate.food, estimate.calories_total, estimate.protein_total
//!         ),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

pub mod error;
pub mod extract;
pub mod pipeline;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use error::{AndhrimnirError, Result};
pub use pipeline::{NutritionPipeline, PipelineError, PipelineStage};
pub use providers::{FoodDataProvider, LabelProvider};

// Re-export all types
pub use types::{
    FoodId, FoodLabel, LabelCandidate, MassGrams, NutrientEntry, NutrientEstimate,
    NutrientSummary, RawNutrientRecord,
};

pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, version_string};
