use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppState, models::AppSettings};

use super::{FieldErrors, server_error, unprocessable};

fn validate(s: &AppSettings) -> FieldErrors {
    let mut errs = FieldErrors::new();

    if s.user_name.trim().is_empty() {
        errs.insert("userName".into(), "Name cannot be empty.".into());
    }
    if !s.user_email.is_empty() && !s.user_email.contains('@') {
        errs.insert("userEmail".into(), "Enter a valid email address.".into());
    }
    if !(1..=10).contains(&s.refresh_interval) {
        errs.insert("refreshInterval".into(), "Refresh interval must be between 1 and 10 seconds.".into());
    }
    if !(7..=365).contains(&s.data_retention) {
        errs.insert("dataRetention".into(), "Data retention must be between 7 and 365 days.".into());
    }

    errs
}

// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(state.workspace.settings().await)).into_response()
}

// POST /api/settings
pub async fn post_settings(State(state): State<AppState>, Json(settings): Json<AppSettings>) -> Response {
    let errs = validate(&settings);
    if !errs.is_empty() {
        return unprocessable(errs);
    }

    match state.workspace.replace_settings(settings).await {
        Ok(s) => {
            tracing::info!(auto_refresh = s.auto_refresh, refresh_interval = s.refresh_interval, "settings saved");
            (StatusCode::OK, Json(s)).into_response()
        }
        Err(e) => server_error(e),
    }
}

// POST /api/settings/reset
pub async fn post_reset_settings(State(state): State<AppState>) -> Response {
    match state.workspace.reset_settings().await {
        Ok(s) => (StatusCode::OK, Json(s)).into_response(),
        Err(e) => server_error(e),
    }
}
