//! Library entrypoint for marketdesk.
//!
//! `main.rs` only wires configuration, storage and background refresh together;
//! everything else lives here so integration tests under `tests/` can build the
//! app state and routers directly.

use std::sync::Arc;

pub mod config;
pub mod models;
pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub quotes: services::quote_source::QuoteService,
    pub workspace: Arc<services::workspace::Workspace>,
}
