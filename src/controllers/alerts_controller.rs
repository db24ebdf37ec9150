use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    models::{Alert, AlertCondition, TriggeredAlert, catalog},
    services::alerts_service::{self, AlertStats, NewAlert},
};

use super::{FieldErrors, error, positive, required_symbol, server_error, unprocessable};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    pub progress: f64,
    pub distance: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsPage {
    pub alerts: Vec<AlertView>,
    pub stats: AlertStats,
    pub notifications: Vec<TriggeredAlert>,
}

// GET /api/alerts
pub async fn get_alerts(State(state): State<AppState>) -> Response {
    let alerts = state.workspace.alerts().await;
    let stats = alerts_service::stats(&alerts);

    let alerts = alerts
        .into_iter()
        .map(|a| AlertView {
            progress: alerts_service::progress(&a),
            distance: alerts_service::distance(&a),
            alert: a,
        })
        .collect();

    let page = AlertsPage {
        alerts,
        stats,
        notifications: state.workspace.notifications().await,
    };
    (StatusCode::OK, Json(page)).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertForm {
    pub symbol: Option<String>,
    pub condition: Option<String>,
    pub target_price: Option<f64>,
}

// POST /api/alerts
pub async fn post_create_alert(State(state): State<AppState>, Json(form): Json<CreateAlertForm>) -> Response {
    let mut errs = FieldErrors::new();

    let symbol = required_symbol(&mut errs, form.symbol.as_deref());
    let condition = form.condition.as_deref().and_then(AlertCondition::parse);
    if condition.is_none() {
        errs.insert("condition".into(), "Choose above or below.".into());
    }
    let target_price = positive(&mut errs, "targetPrice", form.target_price);

    let Some(condition) = condition.filter(|_| errs.is_empty()) else {
        return unprocessable(errs);
    };

    let quote = state.quotes.fetch_quote(&symbol).await;

    let new = NewAlert {
        symbol: &symbol,
        name: catalog::display_name(&symbol),
        condition,
        target_price,
        current_price: quote.price,
    };

    match state.workspace.create_alert(new, Utc::now()).await {
        Ok(alert) => (StatusCode::CREATED, Json(alert)).into_response(),
        Err(e) => server_error(e),
    }
}

// POST /api/alerts/:id/delete
pub async fn post_delete_alert(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.workspace.delete_alert(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error(StatusCode::NOT_FOUND, "Alert not found"),
        Err(e) => server_error(e),
    }
}

// POST /api/alerts/notifications/:id/dismiss
pub async fn post_dismiss_notification(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    if state.workspace.dismiss_notification(id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Notification not found")
    }
}
