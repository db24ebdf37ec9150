use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    models::catalog,
    services::{
        watchlist_service::{self, WatchlistError},
        workspace::WorkspaceError,
    },
};

use super::{FieldErrors, error, required_symbol, server_error, unprocessable};

// GET /api/watchlist
pub async fn get_watchlist(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(state.workspace.watchlist().await)).into_response()
}

#[derive(Deserialize)]
pub struct AddWatchlistForm {
    pub symbol: Option<String>,
    pub name: Option<String>,
}

// POST /api/watchlist
pub async fn post_add_to_watchlist(
    State(state): State<AppState>,
    Json(form): Json<AddWatchlistForm>,
) -> Response {
    let mut errs = FieldErrors::new();
    let symbol = required_symbol(&mut errs, form.symbol.as_deref());
    if !errs.is_empty() {
        return unprocessable(errs);
    }

    if watchlist_service::contains(&state.workspace.watchlist().await, &symbol) {
        return error(StatusCode::CONFLICT, format!("{symbol} is already in the watchlist"));
    }

    let name = form
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| catalog::display_name(&symbol));

    let quote = state.quotes.fetch_quote(&symbol).await;
    let entry = watchlist_service::entry_from_quote(name, &quote);

    match state.workspace.add_watchlist_entry(entry).await {
        Ok(list) => (StatusCode::CREATED, Json(list)).into_response(),
        Err(WorkspaceError::Watchlist(e @ WatchlistError::AlreadyPresent(_))) => {
            error(StatusCode::CONFLICT, e.to_string())
        }
        Err(e) => server_error(e),
    }
}

// POST /api/watchlist/:symbol/delete
pub async fn post_remove_from_watchlist(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    match state.workspace.remove_watchlist_entry(&symbol).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => server_error(e),
    }
}
