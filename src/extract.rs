//! Nutrient extraction from raw food records.
//!
//! Selects the protein and calorie amounts out of the unfiltered nutrient
//! list fetched from the food database. Which fields a record populates
//! varies by food category, so calorie selection walks an ordered fallback
//! table instead of reading a single id.

use crate::types::{NutrientSummary, RawNutrientRecord};
use crate::{AndhrimnirError, Result};

/// Nutrient id for protein (grams per 100g). No fallback exists.
pub const PROTEIN_ID: u32 = 1003;

/// Calorie nutrient ids in priority order.
///
/// 1008 is the standard "Energy" field but is not universally populated:
/// e.g. Foundation records for "chicken" carry 2047/2048 instead, while
/// "banana" carries 1008 only. The first id present in the record wins.
pub const CALORIE_ID_FALLBACK: &[u32] = &[1008, 2047, 2048];

/// Extract a per-100g summary from a raw nutrient record.
///
/// Fails with [`AndhrimnirError::MissingNutrient`] when protein is absent,
/// or when no id in [`CALORIE_ID_FALLBACK`] is present. No unit conversion
/// is performed; amounts are taken as kcal and grams per 100g as supplied.
pub fn extract(record: &RawNutrientRecord) -> Result<NutrientSummary> {
    let protein_per_100g = record
        .amount_of(PROTEIN_ID)
        .ok_or(AndhrimnirError::MissingNutrient("protein"))?;

    let calories_per_100g = CALORIE_ID_FALLBACK
        .iter()
        .find_map(|&id| record.amount_of(id))
        .ok_or(AndhrimnirError::MissingNutrient("calories"))?;

    Ok(NutrientSummary {
        protein_per_100g,
        calories_per_100g,
    })
}
