//! Bundled reference data
//!
//! Loaded once at startup and read-only for the lifetime of the process.

mod loader;
mod types;

pub use loader::{load_index, Dataset};
pub(crate) use types::null_as_default;
pub use types::{
    AgribalyseEntry, ImpactAmount, Ingredient, IngredientEntry, MethodBreakdown, Product,
    SINGLE_SCORE_METHOD,
};
