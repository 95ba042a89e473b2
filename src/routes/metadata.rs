//! Product metadata lookup

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::lookup::{resolve_metadata, MetadataRequest};
use crate::state::AppState;

/// Resolve a `{CIQUALCode, Ingredients}` request body.
///
/// The body is decoded by hand so malformed input answers 500 with the
/// decoder message instead of the extractor's rejection.
pub async fn get_metadata(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let request: MetadataRequest = serde_json::from_slice(&body).map_err(AppError::Decode)?;

    tracing::debug!(
        "Metadata lookup for '{}' with {} explicit ingredients",
        request.ciqual_code,
        request.ingredients.len()
    );

    let response = resolve_metadata(state.dataset(), &request.ciqual_code, &request.ingredients);
    let encoded = serde_json::to_vec(&response).map_err(AppError::Encode)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], encoded).into_response())
}
