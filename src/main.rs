use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use marketdesk::{
    AppState,
    config::{self, QuoteProviderKind},
    routes,
    services::{
        alert_monitor,
        price_refresher,
        quote_source::{QuoteService, YahooClient},
        store::JsonFileStore,
        workspace::Workspace,
    },
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let data_dir = settings.data_dir.clone();
    let workspace = tokio::task::spawn_blocking(move || -> Result<Workspace, BoxError> {
        let store = JsonFileStore::open(&data_dir)?;
        Ok(Workspace::load(Arc::new(store))?)
    })
    .await??;
    let workspace = Arc::new(workspace);

    let quotes = match settings.quote_provider {
        QuoteProviderKind::Yahoo => QuoteService::new(Arc::new(YahooClient::new(settings.quote_api_base.clone()))),
        QuoteProviderKind::Offline => QuoteService::offline(),
    };
    tracing::info!(provider = quotes.provider_id(), data_dir = %settings.data_dir.display(), "quote source ready");

    let state = AppState {
        settings: settings.clone(),
        quotes,
        workspace: workspace.clone(),
    };

    let app_settings = workspace.settings().await;
    let mut tasks = Vec::new();
    if app_settings.auto_refresh {
        let secs = settings.refresh_secs.unwrap_or(app_settings.refresh_interval).max(1);
        let period = Duration::from_secs(secs);

        tasks.push(alert_monitor::spawn_price_alert_monitor(
            state.clone(),
            Duration::from_secs(settings.alert_refresh_secs),
        ));
        tasks.push(price_refresher::spawn_portfolio_refresher(state.clone(), period));
        tasks.push(price_refresher::spawn_watchlist_refresher(state.clone(), period));
    } else {
        tracing::info!("auto refresh disabled; prices update on request only");
    }

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>()?, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for task in tasks {
        task.stop().await;
    }

    Ok(())
}
