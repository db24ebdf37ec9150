//! Keeps holding and watchlist prices current.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::AppState;

use super::quote_source::index_by_symbol;
use super::refresh::RefreshTask;
use super::workspace::WorkspaceError;

pub fn spawn_portfolio_refresher(state: AppState, period: Duration) -> RefreshTask {
    RefreshTask::spawn("portfolio-refresh", period, move || {
        let state = state.clone();
        async move {
            if let Err(e) = refresh_portfolio(&state).await {
                tracing::error!(error = %e, "[portfolio-refresh] tick error");
            }
        }
    })
}

pub fn spawn_watchlist_refresher(state: AppState, period: Duration) -> RefreshTask {
    RefreshTask::spawn("watchlist-refresh", period, move || {
        let state = state.clone();
        async move {
            if let Err(e) = refresh_watchlist(&state).await {
                tracing::error!(error = %e, "[watchlist-refresh] tick error");
            }
        }
    })
}

fn unique(symbols: impl Iterator<Item = String>) -> Vec<String> {
    symbols.collect::<BTreeSet<_>>().into_iter().collect()
}

pub async fn refresh_portfolio(state: &AppState) -> Result<(), WorkspaceError> {
    let holdings = state.workspace.holdings().await;
    if holdings.is_empty() {
        return Ok(());
    }

    let symbols = unique(holdings.iter().map(|h| h.symbol.clone()));
    let quotes = index_by_symbol(state.quotes.fetch_quotes(&symbols).await);
    state.workspace.refresh_holdings(&quotes).await?;

    tracing::debug!(symbols = symbols.len(), "portfolio prices refreshed");
    Ok(())
}

pub async fn refresh_watchlist(state: &AppState) -> Result<(), WorkspaceError> {
    let watchlist = state.workspace.watchlist().await;
    if watchlist.is_empty() {
        return Ok(());
    }

    let symbols = unique(watchlist.iter().map(|e| e.symbol.clone()));
    let quotes = index_by_symbol(state.quotes.fetch_quotes(&symbols).await);
    state.workspace.refresh_watchlist(&quotes).await?;

    tracing::debug!(symbols = symbols.len(), "watchlist prices refreshed");
    Ok(())
}
