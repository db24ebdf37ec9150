use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    models::{Holding, catalog},
    services::portfolio_service::{self, AllocationSlice, HoldingStats, PortfolioStats},
};

use super::{FieldErrors, positive, required_symbol, server_error, unprocessable};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingView {
    #[serde(flatten)]
    pub holding: Holding,
    pub stats: HoldingStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub holdings: Vec<HoldingView>,
    pub summary: PortfolioStats,
    pub allocation: Vec<AllocationSlice>,
}

pub fn portfolio_view(holdings: Vec<Holding>) -> PortfolioView {
    let summary = portfolio_service::aggregate(&holdings);
    let allocation = portfolio_service::allocation(&holdings);
    let holdings = holdings
        .into_iter()
        .map(|h| HoldingView {
            stats: portfolio_service::holding_stats(&h),
            holding: h,
        })
        .collect();

    PortfolioView {
        holdings,
        summary,
        allocation,
    }
}

// GET /api/portfolio
pub async fn get_portfolio(State(state): State<AppState>) -> Response {
    let holdings = state.workspace.holdings().await;
    (StatusCode::OK, Json(portfolio_view(holdings))).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHoldingForm {
    pub symbol: Option<String>,
    pub quantity: Option<f64>,
    pub buy_price: Option<f64>,
    pub buy_date: Option<String>,
}

fn parse_holding(form: AddHoldingForm, today: NaiveDate) -> Result<Holding, FieldErrors> {
    let mut errs = FieldErrors::new();

    let symbol = required_symbol(&mut errs, form.symbol.as_deref());

    let qty = positive(&mut errs, "quantity", form.quantity);
    if !errs.contains_key("quantity") && (qty.fract() != 0.0 || qty > f64::from(u32::MAX)) {
        errs.insert("quantity".into(), "Quantity must be a whole number of shares.".into());
    }

    let buy_price = positive(&mut errs, "buyPrice", form.buy_price);

    let buy_date = match form.buy_date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => today,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) if d <= today => d,
            Ok(_) => {
                errs.insert("buyDate".into(), "Buy date cannot be in the future.".into());
                today
            }
            Err(_) => {
                errs.insert("buyDate".into(), "Use the YYYY-MM-DD format.".into());
                today
            }
        },
    };

    if !errs.is_empty() {
        return Err(errs);
    }

    Ok(Holding {
        name: catalog::display_name(&symbol),
        symbol,
        quantity: qty as u32,
        buy_price,
        buy_date,
        // priced at cost until the next refresh
        current_price: buy_price,
    })
}

// POST /api/portfolio
pub async fn post_add_holding(State(state): State<AppState>, Json(form): Json<AddHoldingForm>) -> Response {
    let holding = match parse_holding(form, Utc::now().date_naive()) {
        Ok(h) => h,
        Err(errs) => return unprocessable(errs),
    };

    tracing::info!(symbol = %holding.symbol, qty = holding.quantity, price = holding.buy_price, "holding added");

    match state.workspace.add_holding(holding).await {
        Ok(holdings) => (StatusCode::CREATED, Json(portfolio_view(holdings))).into_response(),
        Err(e) => server_error(e),
    }
}

// POST /api/portfolio/:symbol/delete
pub async fn post_remove_holding(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    match state.workspace.remove_holding(&symbol).await {
        Ok(holdings) => (StatusCode::OK, Json(portfolio_view(holdings))).into_response(),
        Err(e) => server_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(qty: f64, date: Option<&str>) -> AddHoldingForm {
        AddHoldingForm {
            symbol: Some("infy".to_string()),
            quantity: Some(qty),
            buy_price: Some(1450.0),
            buy_date: date.map(str::to_string),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn new_holding_is_priced_at_cost() {
        let h = parse_holding(form(10.0, Some("2024-01-15")), today()).unwrap();
        assert_eq!(h.symbol, "INFY");
        assert_eq!(h.name, "Infosys");
        assert_eq!(h.current_price, 1450.0);
        assert_eq!(h.buy_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let h = parse_holding(form(1.0, None), today()).unwrap();
        assert_eq!(h.buy_date, today());
    }

    #[test]
    fn fractional_quantity_and_future_date_are_rejected() {
        let errs = parse_holding(form(1.5, Some("2030-01-01")), today()).unwrap_err();
        assert!(errs.contains_key("quantity"));
        assert!(errs.contains_key("buyDate"));
    }
}
