//! Route modules for CIQUAL Explorer
//!
//! - `POST /metadata` resolves a product and its ingredient impacts
//! - `GET /codes` lists the known product codes
//! - anything else serves the index page

pub mod codes;
pub mod index;
pub mod metadata;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/metadata",
            post(metadata::get_metadata).fallback(index::serve_index),
        )
        .route("/codes", get(codes::list_codes).fallback(index::serve_index))
        .fallback(index::serve_index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
