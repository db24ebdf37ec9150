use std::collections::BTreeSet;
use std::time::Duration;

use crate::AppState;

use super::quote_source::index_by_symbol;
use super::refresh::RefreshTask;
use super::workspace::WorkspaceError;

pub fn spawn_price_alert_monitor(state: AppState, period: Duration) -> RefreshTask {
    RefreshTask::spawn("alert-monitor", period, move || {
        let state = state.clone();
        async move {
            if let Err(e) = run_tick(&state).await {
                tracing::error!(error = %e, "[alert-monitor] tick error");
            }
        }
    })
}

/// One pass: quote every alerted symbol once, evaluate, persist. Returns how
/// many alerts fired.
pub async fn run_tick(state: &AppState) -> Result<usize, WorkspaceError> {
    let alerts = state.workspace.alerts().await;
    if alerts.is_empty() {
        return Ok(0);
    }

    // one quote request per symbol per tick
    let symbols: Vec<String> = alerts
        .iter()
        .map(|a| a.symbol.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let quotes = index_by_symbol(state.quotes.fetch_quotes(&symbols).await);
    let fired = state.workspace.evaluate_alerts(&quotes).await?;

    for t in &fired {
        tracing::info!(
            id = t.alert.id,
            symbol = %t.alert.symbol,
            target = t.alert.target_price,
            price = t.triggered_price,
            "price alert triggered"
        );
    }

    Ok(fired.len())
}
