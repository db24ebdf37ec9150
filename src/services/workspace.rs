//! In-memory dashboard state with an explicit save/load boundary.
//!
//! The workspace is the only owner of holdings, watchlist, alerts and settings.
//! Every update computes a new collection from the current one, persists it, and
//! only then swaps it in; a failed save leaves the in-memory state untouched.
//! Store calls run on the blocking pool so file I/O never stalls the runtime.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tokio::task::{self, JoinError};

use crate::models::{Alert, AppSettings, Holding, Quote, TriggeredAlert, WatchlistEntry};

use super::alerts_service::{self, NewAlert};
use super::portfolio_service;
use super::store::{StateStore, StoreError, StoreKey};
use super::watchlist_service::{self, WatchlistError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub holdings: Vec<Holding>,
    pub watchlist: Vec<WatchlistEntry>,
    pub alerts: Vec<Alert>,
    pub settings: AppSettings,
    // not persisted
    pub notifications: Vec<TriggeredAlert>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error("import file is not valid: {0}")]
    Import(#[source] serde_json::Error),

    #[error("import file is not valid: {0}")]
    InvalidImport(String),

    #[error("storage task failed: {0}")]
    Task(#[from] JoinError),
}

/// Backup document: `{settings, portfolio, watchlist, alerts, exportDate}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub settings: AppSettings,
    pub portfolio: Vec<Holding>,
    pub watchlist: Vec<WatchlistEntry>,
    pub alerts: Vec<Alert>,
    pub export_date: DateTime<Utc>,
}

/// Import accepts partial backups; only the sections present are replaced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportBundle {
    settings: Option<AppSettings>,
    portfolio: Option<Vec<Holding>>,
    watchlist: Option<Vec<WatchlistEntry>>,
    alerts: Option<Vec<Alert>>,
}

fn priced(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

impl ImportBundle {
    /// Rejects records the rest of the crate assumes can never exist.
    fn check(&self) -> Result<(), String> {
        for h in self.portfolio.iter().flatten() {
            if h.symbol.trim().is_empty() {
                return Err("holding without a symbol".to_string());
            }
            if h.quantity == 0 {
                return Err(format!("holding {} has zero quantity", h.symbol));
            }
            if !priced(h.buy_price) || !priced(h.current_price) {
                return Err(format!("holding {} has an invalid price", h.symbol));
            }
        }

        let mut symbols = HashSet::new();
        for e in self.watchlist.iter().flatten() {
            if !symbols.insert(e.symbol.trim().to_uppercase()) {
                return Err(format!("{} appears twice in the watchlist", e.symbol));
            }
            if ![e.price, e.change, e.day_high, e.day_low].iter().all(|x| x.is_finite()) {
                return Err(format!("watchlist entry {} has an invalid price", e.symbol));
            }
        }

        let mut ids = HashSet::new();
        for a in self.alerts.iter().flatten() {
            if !ids.insert(a.id) {
                return Err(format!("alert id {} is used twice", a.id));
            }
            if !priced(a.target_price) || !a.current_price.is_finite() || a.current_price < 0.0 {
                return Err(format!("alert {} has an invalid price", a.id));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub settings: bool,
    pub holdings: Option<usize>,
    pub watchlist: Option<usize>,
    pub alerts: Option<usize>,
}

pub struct Workspace {
    store: Arc<dyn StateStore>,
    state: RwLock<Snapshot>,
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn StateStore, key: StoreKey) -> Result<T, StoreError> {
    let Some(doc) = store.load(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_value(doc) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::error!(key = key.as_str(), error = %e, "stored document has an unexpected shape; starting empty");
            Ok(T::default())
        }
    }
}

impl Workspace {
    /// Reads every collection from `store` once.
    pub fn load(store: Arc<dyn StateStore>) -> Result<Self, WorkspaceError> {
        let snapshot = Snapshot {
            holdings: load_or_default(store.as_ref(), StoreKey::Portfolio)?,
            watchlist: load_or_default(store.as_ref(), StoreKey::Watchlist)?,
            alerts: load_or_default(store.as_ref(), StoreKey::PriceAlerts)?,
            settings: load_or_default(store.as_ref(), StoreKey::AppSettings)?,
            notifications: Vec::new(),
        };

        tracing::info!(
            holdings = snapshot.holdings.len(),
            watchlist = snapshot.watchlist.len(),
            alerts = snapshot.alerts.len(),
            "workspace loaded"
        );

        Ok(Self {
            store,
            state: RwLock::new(snapshot),
        })
    }

    async fn with_store<R, F>(&self, op: F) -> Result<R, WorkspaceError>
    where
        F: FnOnce(&dyn StateStore) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let out = task::spawn_blocking(move || op(store.as_ref())).await?;
        Ok(out?)
    }

    async fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), WorkspaceError> {
        let doc = serde_json::to_value(value).map_err(|source| WorkspaceError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.with_store(move |store| store.save(key, &doc)).await
    }

    /// Computes the next collection, persists it, then replaces the current one.
    async fn commit<T, F>(
        &self,
        key: StoreKey,
        slot: fn(&mut Snapshot) -> &mut Vec<T>,
        next: F,
    ) -> Result<Vec<T>, WorkspaceError>
    where
        T: Serialize + Clone,
        F: FnOnce(&[T]) -> Result<Vec<T>, WorkspaceError>,
    {
        let mut state = self.state.write().await;
        let updated = next(slot(&mut *state).as_slice())?;
        self.save(key, &updated).await?;
        *slot(&mut *state) = updated.clone();
        Ok(updated)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    // ---------------- Portfolio ----------------

    pub async fn holdings(&self) -> Vec<Holding> {
        self.state.read().await.holdings.clone()
    }

    pub async fn add_holding(&self, holding: Holding) -> Result<Vec<Holding>, WorkspaceError> {
        self.commit(StoreKey::Portfolio, |s| &mut s.holdings, |hs| {
            Ok(portfolio_service::add_holding(hs, holding))
        })
        .await
    }

    pub async fn remove_holding(&self, symbol: &str) -> Result<Vec<Holding>, WorkspaceError> {
        self.commit(StoreKey::Portfolio, |s| &mut s.holdings, |hs| {
            Ok(portfolio_service::remove_holding(hs, symbol))
        })
        .await
    }

    pub async fn refresh_holdings(&self, quotes: &HashMap<String, Quote>) -> Result<Vec<Holding>, WorkspaceError> {
        self.commit(StoreKey::Portfolio, |s| &mut s.holdings, |hs| {
            Ok(portfolio_service::refresh_prices(hs, quotes))
        })
        .await
    }

    // ---------------- Watchlist ----------------

    pub async fn watchlist(&self) -> Vec<WatchlistEntry> {
        self.state.read().await.watchlist.clone()
    }

    pub async fn add_watchlist_entry(&self, entry: WatchlistEntry) -> Result<Vec<WatchlistEntry>, WorkspaceError> {
        self.commit(StoreKey::Watchlist, |s| &mut s.watchlist, |list| {
            Ok(watchlist_service::add_entry(list, entry)?)
        })
        .await
    }

    pub async fn remove_watchlist_entry(&self, symbol: &str) -> Result<Vec<WatchlistEntry>, WorkspaceError> {
        self.commit(StoreKey::Watchlist, |s| &mut s.watchlist, |list| {
            Ok(watchlist_service::remove_entry(list, symbol))
        })
        .await
    }

    pub async fn refresh_watchlist(
        &self,
        quotes: &HashMap<String, Quote>,
    ) -> Result<Vec<WatchlistEntry>, WorkspaceError> {
        self.commit(StoreKey::Watchlist, |s| &mut s.watchlist, |list| {
            Ok(watchlist_service::refresh_entries(list, quotes))
        })
        .await
    }

    // ---------------- Alerts ----------------

    pub async fn alerts(&self) -> Vec<Alert> {
        self.state.read().await.alerts.clone()
    }

    pub async fn create_alert(&self, new: NewAlert<'_>, now: DateTime<Utc>) -> Result<Alert, WorkspaceError> {
        let mut state = self.state.write().await;
        let (out, alert) = alerts_service::create_alert(&state.alerts, new, now);
        self.save(StoreKey::PriceAlerts, &out).await?;
        state.alerts = out;

        tracing::info!(id = alert.id, symbol = %alert.symbol, target = alert.target_price, "alert created");
        Ok(alert)
    }

    /// Returns whether an alert with `id` existed.
    pub async fn delete_alert(&self, id: u64) -> Result<bool, WorkspaceError> {
        let mut state = self.state.write().await;
        let (out, removed) = alerts_service::delete_alert(&state.alerts, id);
        if removed {
            self.save(StoreKey::PriceAlerts, &out).await?;
            state.alerts = out;
        }
        Ok(removed)
    }

    /// Applies quotes to all alerts and records newly triggered ones as notifications
    /// (only when price-alert notifications are enabled in settings). Nothing is
    /// written when no alert changed.
    pub async fn evaluate_alerts(
        &self,
        quotes: &HashMap<String, Quote>,
    ) -> Result<Vec<TriggeredAlert>, WorkspaceError> {
        let mut state = self.state.write().await;

        let eval = alerts_service::evaluate(&state.alerts, quotes);
        if eval.updated_alerts != state.alerts {
            self.save(StoreKey::PriceAlerts, &eval.updated_alerts).await?;
            state.alerts = eval.updated_alerts;
        }

        if state.settings.price_alerts {
            state.notifications.extend(eval.newly_triggered.iter().cloned());
        }

        Ok(eval.newly_triggered)
    }

    pub async fn notifications(&self) -> Vec<TriggeredAlert> {
        self.state.read().await.notifications.clone()
    }

    pub async fn dismiss_notification(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.alert.id != id);
        state.notifications.len() != before
    }

    // ---------------- Settings ----------------

    pub async fn settings(&self) -> AppSettings {
        self.state.read().await.settings.clone()
    }

    pub async fn replace_settings(&self, settings: AppSettings) -> Result<AppSettings, WorkspaceError> {
        let mut state = self.state.write().await;
        self.save(StoreKey::AppSettings, &settings).await?;
        state.settings = settings.clone();
        Ok(settings)
    }

    pub async fn reset_settings(&self) -> Result<AppSettings, WorkspaceError> {
        self.replace_settings(AppSettings::default()).await
    }

    // ---------------- Backup ----------------

    pub async fn export(&self, now: DateTime<Utc>) -> ExportBundle {
        let state = self.state.read().await;
        ExportBundle {
            settings: state.settings.clone(),
            portfolio: state.holdings.clone(),
            watchlist: state.watchlist.clone(),
            alerts: state.alerts.clone(),
            export_date: now,
        }
    }

    /// Replaces the sections present in `raw`. A document that does not parse,
    /// or whose records break the model's invariants, changes nothing.
    pub async fn import(&self, raw: &str) -> Result<ImportSummary, WorkspaceError> {
        let bundle: ImportBundle = serde_json::from_str(raw).map_err(WorkspaceError::Import)?;
        bundle.check().map_err(WorkspaceError::InvalidImport)?;

        let mut state = self.state.write().await;
        let mut summary = ImportSummary::default();

        if let Some(settings) = bundle.settings {
            self.save(StoreKey::AppSettings, &settings).await?;
            state.settings = settings;
            summary.settings = true;
        }
        if let Some(holdings) = bundle.portfolio {
            self.save(StoreKey::Portfolio, &holdings).await?;
            summary.holdings = Some(holdings.len());
            state.holdings = holdings;
        }
        if let Some(watchlist) = bundle.watchlist {
            self.save(StoreKey::Watchlist, &watchlist).await?;
            summary.watchlist = Some(watchlist.len());
            state.watchlist = watchlist;
        }
        if let Some(alerts) = bundle.alerts {
            self.save(StoreKey::PriceAlerts, &alerts).await?;
            summary.alerts = Some(alerts.len());
            state.alerts = alerts;
        }

        tracing::info!(?summary, "import applied");
        Ok(summary)
    }

    /// Deletes every stored collection and resets to defaults.
    pub async fn clear(&self) -> Result<(), WorkspaceError> {
        let mut state = self.state.write().await;
        self.with_store(|store| StoreKey::ALL.into_iter().try_for_each(|key| store.remove(key)))
            .await?;
        *state = Snapshot::default();
        tracing::warn!("all dashboard data cleared");
        Ok(())
    }
}
