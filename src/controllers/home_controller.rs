use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "quoteProvider": state.quotes.provider_id() })),
    )
}

pub async fn not_found() -> Response {
    super::error(StatusCode::NOT_FOUND, "Not found")
}
