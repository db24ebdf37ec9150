use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::services::calculator_service;

use super::{FieldErrors, non_negative, positive, unprocessable};

// Rates above this are almost certainly a typo (e.g. 1200 for 12%).
const MAX_RATE_PERCENT: f64 = 100.0;
const MAX_YEARS: f64 = 100.0;

fn rate(errs: &mut FieldErrors, value: Option<f64>) -> f64 {
    let r = non_negative(errs, "expectedReturn", value);
    if r > MAX_RATE_PERCENT {
        errs.insert("expectedReturn".into(), "Expected return must be at most 100%.".into());
    }
    r
}

fn years(errs: &mut FieldErrors, value: Option<f64>) -> f64 {
    let y = non_negative(errs, "timePeriod", value);
    if y > MAX_YEARS {
        errs.insert("timePeriod".into(), "Horizon must be at most 100 years.".into());
    }
    y
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipForm {
    pub monthly_investment: Option<f64>,
    pub expected_return: Option<f64>,
    pub time_period: Option<f64>,
}

// POST /api/calculators/sip
pub async fn post_sip(Json(form): Json<SipForm>) -> Response {
    let mut errs = FieldErrors::new();
    let monthly = non_negative(&mut errs, "monthlyInvestment", form.monthly_investment);
    let r = rate(&mut errs, form.expected_return);
    let y = years(&mut errs, form.time_period);

    if !errs.is_empty() {
        return unprocessable(errs);
    }
    (StatusCode::OK, Json(calculator_service::sip(monthly, r, y))).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumForm {
    pub investment: Option<f64>,
    pub expected_return: Option<f64>,
    pub time_period: Option<f64>,
}

// POST /api/calculators/lumpsum
pub async fn post_lumpsum(Json(form): Json<LumpsumForm>) -> Response {
    let mut errs = FieldErrors::new();
    let principal = non_negative(&mut errs, "investment", form.investment);
    let r = rate(&mut errs, form.expected_return);
    let y = years(&mut errs, form.time_period);

    if !errs.is_empty() {
        return unprocessable(errs);
    }
    (StatusCode::OK, Json(calculator_service::lumpsum(principal, r, y))).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetForm {
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub expected_return: Option<f64>,
    pub time_period: Option<f64>,
}

// POST /api/calculators/target
pub async fn post_target(Json(form): Json<TargetForm>) -> Response {
    let mut errs = FieldErrors::new();
    let target = positive(&mut errs, "targetAmount", form.target_amount);
    let current = non_negative(&mut errs, "currentAmount", form.current_amount);
    let r = rate(&mut errs, form.expected_return);
    let y = years(&mut errs, form.time_period);

    if !errs.is_empty() {
        return unprocessable(errs);
    }
    (StatusCode::OK, Json(calculator_service::target_gap(target, current, r, y))).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossForm {
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub quantity: Option<f64>,
    // percent of traded value, per leg
    pub brokerage: Option<f64>,
}

// POST /api/calculators/profit-loss
pub async fn post_profit_loss(Json(form): Json<ProfitLossForm>) -> Response {
    let mut errs = FieldErrors::new();
    let buy = non_negative(&mut errs, "buyPrice", form.buy_price);
    let sell = non_negative(&mut errs, "sellPrice", form.sell_price);
    let qty = positive(&mut errs, "quantity", form.quantity);
    // brokerage is optional in the form; blank means none
    let brokerage = non_negative(&mut errs, "brokerage", Some(form.brokerage.unwrap_or(0.0)));

    if !errs.is_empty() {
        return unprocessable(errs);
    }
    (StatusCode::OK, Json(calculator_service::profit_loss(buy, sell, qty, brokerage))).into_response()
}
