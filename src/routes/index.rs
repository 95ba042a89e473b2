//! Static index page, served for every unmatched route

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

/// Serve the bundled index page verbatim, whatever the method
pub async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.index(),
    )
}
