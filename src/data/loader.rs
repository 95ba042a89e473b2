//! Startup loading of the bundled resources
//!
//! Every resource must be present and well-formed. There is no partial or
//! degraded mode: any failure is returned to the caller, which aborts.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use super::types::{AgribalyseEntry, Ingredient, Product};
use crate::config::DataConfig;
use crate::error::LoadError;

/// Read-only in-memory datasets
#[derive(Debug, Default)]
pub struct Dataset {
    products: HashMap<String, Product>,
    agribalyse: HashMap<String, AgribalyseEntry>,
    ingredients: HashMap<String, Ingredient>,
}

impl Dataset {
    /// Load the three JSON datasets from the data directory
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let products: Vec<Product> = read_json(&config.products_path())?;
        let agribalyse: Vec<AgribalyseEntry> = read_json(&config.agribalyse_path())?;
        let ingredients: HashMap<String, Ingredient> = read_json(&config.ingredients_path())?;

        let dataset = Self::from_records(products, agribalyse, ingredients);
        tracing::debug!(
            "Loaded {} products, {} AgriBalyse entries, {} ingredients from {}",
            dataset.products.len(),
            dataset.agribalyse.len(),
            dataset.ingredients.len(),
            config.dir.display()
        );
        Ok(dataset)
    }

    /// Index record lists by product code. Later duplicates replace earlier ones.
    pub fn from_records(
        products: Vec<Product>,
        agribalyse: Vec<AgribalyseEntry>,
        ingredients: HashMap<String, Ingredient>,
    ) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|p| (p.ciqual_code.clone(), p))
                .collect(),
            agribalyse: agribalyse
                .into_iter()
                .map(|e| (e.ciqual_code.clone(), e))
                .collect(),
            ingredients,
        }
    }

    pub fn product(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }

    pub fn agribalyse_entry(&self, code: &str) -> Option<&AgribalyseEntry> {
        self.agribalyse.get(code)
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    /// Codes of the primary catalog only
    pub fn product_codes(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn agribalyse_count(&self) -> usize {
        self.agribalyse.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

/// Load the static index page as opaque bytes
pub fn load_index(config: &DataConfig) -> Result<Bytes, LoadError> {
    let path = config.index_path();
    std::fs::read(&path)
        .map(Bytes::from)
        .map_err(|source| LoadError::Io { path, source })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
