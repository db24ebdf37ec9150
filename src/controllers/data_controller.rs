use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use crate::{AppState, services::workspace::WorkspaceError};

use super::{error, server_error};

// GET /api/data/export
pub async fn get_export(State(state): State<AppState>) -> Response {
    let now = Utc::now();
    let bundle = state.workspace.export(now).await;

    let body = match serde_json::to_string_pretty(&bundle) {
        Ok(s) => s,
        Err(e) => return server_error(e),
    };

    let disposition = format!(
        "attachment; filename=\"stock-dashboard-backup-{}.json\"",
        now.format("%Y-%m-%d")
    );

    let mut res = (StatusCode::OK, body).into_response();
    let headers = res.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(v) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, v);
    }
    res
}

// POST /api/data/import
pub async fn post_import(State(state): State<AppState>, body: String) -> Response {
    match state.workspace.import(&body).await {
        Ok(summary) => (StatusCode::OK, Json(json!({ "imported": summary }))).into_response(),
        Err(e @ (WorkspaceError::Import(_) | WorkspaceError::InvalidImport(_))) => {
            tracing::warn!(error = %e, "rejected import");
            error(StatusCode::BAD_REQUEST, format!("Error importing data: {e}"))
        }
        Err(e) => server_error(e),
    }
}

// POST /api/data/clear
pub async fn post_clear(State(state): State<AppState>) -> Response {
    match state.workspace.clear().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => server_error(e),
    }
}
