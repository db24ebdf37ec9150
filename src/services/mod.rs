pub mod quote_source;
pub mod store;
pub mod workspace;
pub mod refresh;
pub mod alert_monitor;
pub mod price_refresher;

pub mod calculator_service;
pub mod portfolio_service;
pub mod alerts_service;
pub mod watchlist_service;
pub mod comparison_service;
pub mod market_service;
