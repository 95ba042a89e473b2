//! Known product codes

use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::state::AppState;

/// List primary catalog codes as a set encoded as `{code: true}`.
///
/// Codes that only exist in the AgriBalyse dataset are not listed.
pub async fn list_codes(State(state): State<AppState>) -> Json<BTreeMap<String, bool>> {
    let codes = state
        .dataset()
        .product_codes()
        .map(|code| (code.to_string(), true))
        .collect();
    Json(codes)
}
