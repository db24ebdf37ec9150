use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub mod home_controller;
pub mod calculator_controller;
pub mod portfolio_controller;
pub mod watchlist_controller;
pub mod alerts_controller;
pub mod settings_controller;
pub mod data_controller;
pub mod market_controller;

/// Field name -> message; `_form` for errors that belong to no single field.
pub type FieldErrors = HashMap<String, String>;

pub(crate) fn unprocessable(errs: FieldErrors) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errs }))).into_response()
}

pub(crate) fn server_error(e: impl std::fmt::Display) -> Response {
    tracing::error!(error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Server error. Please try again." })),
    )
        .into_response()
}

pub(crate) fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// A required, finite, non-negative number. Records an error and returns 0 otherwise.
pub(crate) fn non_negative(errs: &mut FieldErrors, field: &str, value: Option<f64>) -> f64 {
    match value {
        None => {
            errs.insert(field.into(), "This field is required.".into());
            0.0
        }
        Some(v) if !v.is_finite() || v < 0.0 => {
            errs.insert(field.into(), "Enter a valid non-negative number.".into());
            0.0
        }
        Some(v) => v,
    }
}

/// Like `non_negative` but zero is rejected too.
pub(crate) fn positive(errs: &mut FieldErrors, field: &str, value: Option<f64>) -> f64 {
    let v = non_negative(errs, field, value);
    if v == 0.0 && !errs.contains_key(field) {
        errs.insert(field.into(), "Must be greater than zero.".into());
    }
    v
}

pub(crate) fn required_symbol(errs: &mut FieldErrors, value: Option<&str>) -> String {
    let sym = value.map(|s| s.trim().to_uppercase()).unwrap_or_default();
    if sym.is_empty() {
        errs.insert("symbol".into(), "Enter a stock symbol.".into());
    } else if sym.len() > 20 || !sym.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '&' | '-' | '.' | '^')) {
        errs.insert("symbol".into(), "Symbol contains invalid characters.".into());
    }
    sym
}
