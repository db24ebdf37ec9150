//! Quote source: a fallible upstream provider plus the resilient service the
//! rest of the crate talks to.
//!
//! `QuoteService` never fails. When the provider errors for a symbol, a
//! synthetic snapshot of the same shape is substituted for that symbol only and
//! the failure is logged.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::models::{IndexName, IndexSnapshot, Quote, catalog};

pub const DEFAULT_YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed quote payload: {0}")]
    Malformed(String),

    #[error("quote provider is offline")]
    Offline,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;

    async fn index(&self, index: IndexName) -> Result<IndexSnapshot, QuoteError>;
}

// ---------------- Yahoo chart API ----------------

#[derive(Clone)]
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    async fn chart(&self, yahoo_symbol: &str) -> Result<ChartResponse, QuoteError> {
        let url = format!("{}{}", self.base_url, yahoo_symbol);
        let res = self
            .http
            .get(&url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(QuoteError::Status { status, body });
        }

        Ok(res.json::<ChartResponse>().await?)
    }
}

/// NSE listings are addressed with a `.NS` suffix; indices and already
/// qualified symbols pass through.
pub fn yahoo_symbol(symbol: &str) -> String {
    let sym = symbol.trim().to_uppercase();
    if sym.starts_with('^') || sym.contains('.') {
        sym
    } else {
        format!("{sym}.NS")
    }
}

fn index_symbol(index: IndexName) -> &'static str {
    match index {
        IndexName::Nifty => "^NSEI",
        IndexName::Sensex => "^BSESN",
    }
}

#[async_trait]
impl QuoteProvider for YahooClient {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let chart = self.chart(&yahoo_symbol(symbol)).await?;
        quote_from_chart(symbol, chart)
    }

    async fn index(&self, index: IndexName) -> Result<IndexSnapshot, QuoteError> {
        let chart = self.chart(index_symbol(index)).await?;
        let q = quote_from_chart(index.as_str(), chart)?;
        Ok(IndexSnapshot {
            name: index,
            value: q.price,
            change: q.change(),
            change_percent: q.change_percent(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub regular_market_open: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<IndicatorQuote>,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

fn last_present<T: Copy>(xs: &[Option<T>]) -> Option<T> {
    xs.iter().rev().find_map(|x| *x)
}

pub fn quote_from_chart(symbol: &str, chart: ChartResponse) -> Result<Quote, QuoteError> {
    let result = chart
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| QuoteError::Malformed("empty chart result".to_string()))?;

    let series = result.indicators.and_then(|i| i.quote.into_iter().next());
    let meta = result.meta;

    let price = meta
        .regular_market_price
        .or_else(|| series.as_ref().and_then(|s| last_present(&s.close)))
        .ok_or_else(|| QuoteError::Malformed("missing price".to_string()))?;
    let previous_close = meta
        .previous_close
        .or(meta.chart_previous_close)
        .ok_or_else(|| QuoteError::Malformed("missing previous close".to_string()))?;
    let volume = series
        .as_ref()
        .and_then(|s| last_present(&s.volume))
        .unwrap_or(0);

    Ok(Quote {
        symbol: symbol.trim().to_uppercase(),
        price,
        previous_close,
        open: meta.regular_market_open.unwrap_or(price),
        high: meta.regular_market_day_high.unwrap_or(price),
        low: meta.regular_market_day_low.unwrap_or(price),
        volume,
    })
}

// ---------------- Offline ----------------

/// Provider that never reaches the network; every request falls back to synthetic data.
pub struct OfflineProvider;

#[async_trait]
impl QuoteProvider for OfflineProvider {
    fn id(&self) -> &'static str {
        "OFFLINE"
    }

    async fn quote(&self, _symbol: &str) -> Result<Quote, QuoteError> {
        Err(QuoteError::Offline)
    }

    async fn index(&self, _index: IndexName) -> Result<IndexSnapshot, QuoteError> {
        Err(QuoteError::Offline)
    }
}

// ---------------- Synthetic fallback ----------------

/// Random snapshot around the catalog reference price (or 500..3500 for unknown symbols).
pub fn synthetic_quote(symbol: &str) -> Quote {
    let mut rng = rand::thread_rng();

    let base = match catalog::find(symbol) {
        Some(s) => s.reference_price * rng.gen_range(0.98..1.02),
        None => rng.gen_range(500.0..3500.0),
    };
    let change = rng.gen_range(-50.0..50.0);

    Quote {
        symbol: symbol.trim().to_uppercase(),
        price: base,
        previous_close: base - change,
        open: base - rng.gen_range(-15.0..15.0),
        high: base + rng.gen_range(0.0..50.0),
        low: (base - rng.gen_range(0.0..50.0)).max(0.01),
        volume: rng.gen_range(0..20_000_000),
    }
}

pub fn fallback_index(index: IndexName) -> IndexSnapshot {
    let (value, change, change_percent) = match index {
        IndexName::Nifty => (19674.25, 167.50, 0.85),
        IndexName::Sensex => (65982.10, -210.35, -0.32),
    };
    IndexSnapshot {
        name: index,
        value,
        change,
        change_percent,
    }
}

// ---------------- Service ----------------

pub fn index_by_symbol(quotes: Vec<Quote>) -> HashMap<String, Quote> {
    quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect()
}

#[derive(Clone)]
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineProvider))
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Quote {
        match self.provider.quote(symbol).await {
            Ok(q) if q.has_usable_price() => q,
            Ok(_) => {
                tracing::warn!(symbol, provider = self.provider.id(), "unusable price; using synthetic quote");
                synthetic_quote(symbol)
            }
            Err(QuoteError::Offline) => synthetic_quote(symbol),
            Err(e) => {
                tracing::warn!(symbol, provider = self.provider.id(), error = %e, "quote fetch failed; using synthetic quote");
                synthetic_quote(symbol)
            }
        }
    }

    /// One quote per requested symbol, in request order. Symbols are fetched concurrently.
    pub async fn fetch_quotes(&self, symbols: &[String]) -> Vec<Quote> {
        join_all(symbols.iter().map(|s| self.fetch_quote(s))).await
    }

    pub async fn fetch_index(&self, index: IndexName) -> IndexSnapshot {
        match self.provider.index(index).await {
            Ok(snapshot) => snapshot,
            Err(QuoteError::Offline) => fallback_index(index),
            Err(e) => {
                tracing::warn!(index = index.as_str(), error = %e, "index fetch failed; using fallback");
                fallback_index(index)
            }
        }
    }
}
