//! Helpers to convert prediction results into display strings.
//!
//! Everything shown on the results panel goes through here so the formatting
//! rules can be tested without a renderer. Totals are taken as returned by
//! the service and never derived from the ingredient rows.

use crate::prediction::{IngredientRecord, PredictionResult, Quantity};

/// Shown for any figure the service did not report.
pub const PLACEHOLDER: &str = "N/A";
/// Shown when an ingredient has a blank name.
pub const UNNAMED_INGREDIENT: &str = "Unknown item";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientRowView {
    pub name: String,
    /// `P: {p}g | C: {c}g | F: {f}g`
    pub macros: String,
    pub calories: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalsView {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsViewModel {
    /// Link to the service's copy of the image, `None` when it sent none.
    pub image_url: Option<String>,
    pub rows: Vec<IngredientRowView>,
    pub totals: TotalsView,
}

impl ResultsViewModel {
    pub fn from_result(result: &PredictionResult) -> Self {
        let image_url = Some(result.image_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        let totals = &result.totals;
        Self {
            image_url,
            rows: result.ingredients.iter().map(ingredient_row).collect(),
            totals: TotalsView {
                calories: raw_or_placeholder(totals.calories.as_ref()),
                protein: grams_or_placeholder(totals.protein_g.as_ref()),
                carbs: grams_or_placeholder(totals.carbs_g.as_ref()),
                fat: grams_or_placeholder(totals.fat_g.as_ref()),
            },
        }
    }
}

fn ingredient_row(record: &IngredientRecord) -> IngredientRowView {
    let name = record.name.trim();
    IngredientRowView {
        name: if name.is_empty() {
            UNNAMED_INGREDIENT.to_string()
        } else {
            name.to_string()
        },
        macros: format!(
            "P: {}g | C: {}g | F: {}g",
            raw_or_placeholder(record.protein_g.as_ref()),
            raw_or_placeholder(record.carbs_g.as_ref()),
            raw_or_placeholder(record.fat_g.as_ref()),
        ),
        calories: raw_or_placeholder(record.calories.as_ref()),
    }
}

fn raw_or_placeholder(value: Option<&Quantity>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), Quantity::to_string)
}

/// One decimal place with a `g` suffix, or the placeholder when the value has
/// no numeric reading.
fn grams_or_placeholder(value: Option<&Quantity>) -> String {
    match value.and_then(Quantity::as_number) {
        Some(grams) if grams.is_finite() => format!("{grams:.1}g"),
        _ => PLACEHOLDER.to_string(),
    }
}
