//! Public types for the Andhrimnir API.

mod label;
mod mass;
mod nutrient;

pub use label::{FoodLabel, LabelCandidate};
pub use mass::MassGrams;
pub use nutrient::{FoodId, NutrientEntry, NutrientEstimate, NutrientSummary, RawNutrientRecord};
