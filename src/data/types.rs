//! Dataset record types
//!
//! Typed views over the three bundled JSON resources:
//! - Product catalog entries (`products.json`)
//! - AgriBalyse impact entries (`Agribalyse.json`)
//! - Ingredient impact table entries (`ingredients.json`)
//!
//! Paths that may be missing in the source data are optional and checked
//! once, at lookup time.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

/// Impact method key of the single-score environmental metric
pub const SINGLE_SCORE_METHOD: &str = "Score unique EF";

/// Deserialize an absent or `null` value as `T::default()`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A product from the primary catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub ciqual_code: String,
    pub product_name: String,
    /// Ingredient entries in recipe order
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<IngredientEntry>,
}

/// One ingredient line of a product recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub id: String,
    /// Weight percentage within the product
    pub percent: f64,
}

/// An ingredient with its impacts keyed by method name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub impacts: HashMap<String, Option<ImpactAmount>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactAmount {
    #[serde(default)]
    pub amount: Option<f64>,
}

impl Ingredient {
    /// Single-score amount, if this ingredient carries one
    pub fn single_score(&self) -> Option<f64> {
        self.impacts
            .get(SINGLE_SCORE_METHOD)
            .and_then(Option::as_ref)
            .and_then(|impact| impact.amount)
    }
}

/// An entry of the secondary (AgriBalyse) dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgribalyseEntry {
    pub ciqual_code: String,
    pub nom_francais: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact_environnemental: HashMap<String, Option<MethodBreakdown>>,
}

/// Per-method impact breakdown in the AgriBalyse dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodBreakdown {
    /// Impact amount per ingredient identifier, no weights
    #[serde(default)]
    pub ingredients: Option<BTreeMap<String, Option<f64>>>,
}

impl AgribalyseEntry {
    /// Per-ingredient single-score amounts, ordered by ingredient identifier.
    /// Ingredients with a `null` amount are skipped.
    pub fn single_score_ingredients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.impact_environnemental
            .get(SINGLE_SCORE_METHOD)
            .and_then(Option::as_ref)
            .and_then(|breakdown| breakdown.ingredients.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|(id, amount)| amount.map(|amount| (id.as_str(), amount)))
    }
}
