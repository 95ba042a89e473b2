//! Application state management

use std::sync::Arc;

use axum::body::Bytes;

use crate::data::Dataset;

/// Shared application state
///
/// Built once at startup and never mutated, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    dataset: Dataset,
    index: Bytes,
}

impl AppState {
    pub fn new(dataset: Dataset, index: Bytes) -> Self {
        Self {
            inner: Arc::new(AppStateInner { dataset, index }),
        }
    }

    /// Get the loaded datasets
    pub fn dataset(&self) -> &Dataset {
        &self.inner.dataset
    }

    /// Get the static index page
    pub fn index(&self) -> Bytes {
        self.inner.index.clone()
    }
}
