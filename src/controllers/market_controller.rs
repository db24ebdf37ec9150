use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    models::{IndexName, catalog},
    services::{comparison_service, market_service},
};

use super::{FieldErrors, required_symbol, unprocessable};

const DEFAULT_MOVERS: usize = 5;

// GET /api/quotes/:symbol
pub async fn get_quote(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    let mut errs = FieldErrors::new();
    let symbol = required_symbol(&mut errs, Some(&symbol));
    if !errs.is_empty() {
        return unprocessable(errs);
    }

    let quote = state.quotes.fetch_quote(&symbol).await;
    (
        StatusCode::OK,
        Json(json!({
            "quote": quote,
            "name": catalog::display_name(&symbol),
            "change": quote.change(),
            "changePercent": quote.change_percent(),
        })),
    )
        .into_response()
}

// GET /api/market/indices
pub async fn get_indices(State(state): State<AppState>) -> Response {
    let (nifty, sensex) = tokio::join!(
        state.quotes.fetch_index(IndexName::Nifty),
        state.quotes.fetch_index(IndexName::Sensex),
    );
    (StatusCode::OK, Json(vec![nifty, sensex])).into_response()
}

#[derive(Deserialize)]
pub struct MoversQuery {
    pub limit: Option<usize>,
}

// GET /api/market/movers?limit=5
pub async fn get_movers(State(state): State<AppState>, Query(q): Query<MoversQuery>) -> Response {
    let limit = q.limit.unwrap_or(DEFAULT_MOVERS).clamp(1, catalog::STOCKS.len());
    let quotes = state.quotes.fetch_quotes(&catalog::symbols()).await;
    (StatusCode::OK, Json(market_service::top_movers(&quotes, limit))).into_response()
}

#[derive(Deserialize)]
pub struct CompareForm {
    #[serde(default)]
    pub symbols: Vec<String>,
}

// POST /api/compare
pub async fn post_compare(Json(form): Json<CompareForm>) -> Response {
    match comparison_service::compare(&form.symbols) {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(e) => {
            let mut errs = FieldErrors::new();
            errs.insert("symbols".into(), e.to_string());
            unprocessable(errs)
        }
    }
}
