//! Nutrient record and estimate types.

use serde::{Deserialize, Serialize};

/// Opaque food record identifier in the external nutrition database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub i64);

impl std::fmt::Display for FoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One nutrient field of a food record: a numeric nutrient code and its
/// amount per 100g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientEntry {
    /// Nutrient code in the database schema (e.g. 1003 = protein).
    pub nutrient_id: u32,
    /// Amount per 100g serving, in the unit the database reports for
    /// this nutrient (grams for protein, kcal for energy).
    pub amount: f64,
}

/// The full nutrient list of one food record, as fetched.
///
/// Unordered; a record may carry several energy-like ids at once, or none.
/// Built per lookup and discarded after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNutrientRecord {
    pub entries: Vec<NutrientEntry>,
}

impl RawNutrientRecord {
    /// Build a record from `(nutrient_id, amount)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(nutrient_id, amount)| NutrientEntry {
                    nutrient_id,
                    amount,
                })
                .collect(),
        }
    }

    /// Amount of the first entry with the given id, if present.
    pub fn amount_of(&self, nutrient_id: u32) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.nutrient_id == nutrient_id)
            .map(|entry| entry.amount)
    }
}

/// Normalized per-100g nutrient values for one food.
///
/// Either fully populated or not produced at all; extraction never returns
/// a partial summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientSummary {
    /// Protein in grams per 100g.
    pub protein_per_100g: f64,
    /// Energy in kcal per 100g.
    pub calories_per_100g: f64,
}

/// Final pipeline output: totals scaled to the supplied mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientEstimate {
    /// The detected food label.
    pub food: crate::types::FoodLabel,
    /// Total energy in kcal for the supplied mass.
    pub calories_total: f64,
    /// Total protein in grams for the supplied mass.
    pub protein_total: f64,
}
