#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use marketdesk::{
    AppState, config,
    models::{IndexName, IndexSnapshot, Quote},
    services::{
        quote_source::{QuoteError, QuoteProvider, QuoteService},
        store::{MemoryStore, StateStore},
        workspace::Workspace,
    },
};
use serde_json::Value;

/// Provider serving fixed prices; symbols without a price fail upstream.
#[derive(Default)]
pub struct FixedPrices {
    prices: Mutex<HashMap<String, f64>>,
}

impl FixedPrices {
    pub fn with(prices: &[(&str, f64)]) -> Arc<Self> {
        let p = Self::default();
        for (sym, price) in prices {
            p.set(sym, *price);
        }
        Arc::new(p)
    }

    pub fn set(&self, symbol: &str, price: f64) {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
    }
}

#[async_trait]
impl QuoteProvider for FixedPrices {
    fn id(&self) -> &'static str {
        "FIXED"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let price = self.prices.lock().unwrap().get(symbol).copied();
        match price {
            Some(price) => Ok(Quote {
                symbol: symbol.to_string(),
                price,
                previous_close: price,
                open: price,
                high: price,
                low: price,
                volume: 1_000,
            }),
            None => Err(QuoteError::Status {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }

    async fn index(&self, _index: IndexName) -> Result<IndexSnapshot, QuoteError> {
        Err(QuoteError::Malformed("no indices".to_string()))
    }
}

pub fn state_with(quotes: QuoteService, store: Arc<dyn StateStore>) -> AppState {
    AppState {
        settings: config::Settings::for_tests("./unused"),
        quotes,
        workspace: Arc::new(Workspace::load(store).unwrap()),
    }
}

pub fn test_state() -> AppState {
    state_with(QuoteService::offline(), Arc::new(MemoryStore::new()))
}

pub fn fixed_state(provider: Arc<FixedPrices>) -> AppState {
    state_with(QuoteService::new(provider), Arc::new(MemoryStore::new()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
