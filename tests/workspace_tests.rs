use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use chrono::{NaiveDate, TimeZone, Utc};
use marketdesk::{
    models::{AlertCondition, Holding, Quote},
    services::{
        alerts_service::NewAlert,
        store::{JsonFileStore, MemoryStore, StateStore, StoreError, StoreKey},
        workspace::{Workspace, WorkspaceError},
    },
};
use serde_json::Value;

fn holding(symbol: &str) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        quantity: 3,
        buy_price: 1000.0,
        buy_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        current_price: 1000.0,
    }
}

/// Reads nothing and refuses every write.
struct ReadOnlyStore;

impl StateStore for ReadOnlyStore {
    fn load(&self, _key: StoreKey) -> Result<Option<Value>, StoreError> {
        Ok(None)
    }

    fn save(&self, _key: StoreKey, _value: &Value) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn remove(&self, _key: StoreKey) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

#[tokio::test]
async fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ws = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap())).unwrap();
        ws.add_holding(holding("SUNPHARMA")).await.unwrap();
        ws.create_alert(
            NewAlert {
                symbol: "sunpharma",
                name: "Sun Pharma".to_string(),
                condition: AlertCondition::Above,
                target_price: 1200.0,
                current_price: 1145.8,
            },
            Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap(),
        )
        .await
        .unwrap();
    }

    assert!(dir.path().join("portfolio.json").exists());
    assert!(dir.path().join("priceAlerts.json").exists());

    let ws = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap())).unwrap();
    let snap = ws.snapshot().await;
    assert_eq!(snap.holdings, vec![holding("SUNPHARMA")]);
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].symbol, "SUNPHARMA");
}

#[tokio::test]
async fn unexpected_shape_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("portfolio.json"), r#"{"holdings":"?"}"#).unwrap();
    std::fs::write(dir.path().join("appSettings.json"), r#"{"userName":"Ravi"}"#).unwrap();

    let ws = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap())).unwrap();
    let snap = ws.snapshot().await;
    assert!(snap.holdings.is_empty());
    assert_eq!(snap.settings.user_name, "Ravi");
    assert_eq!(snap.settings.refresh_interval, 3);
}

#[tokio::test]
async fn unreadable_json_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), "[{").unwrap();

    let err = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap()))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        WorkspaceError::Store(StoreError::Corrupt { key: "watchlist", .. })
    ));
}

#[tokio::test]
async fn failed_save_leaves_state_untouched() {
    let ws = Workspace::load(Arc::new(ReadOnlyStore)).unwrap();

    assert!(ws.add_holding(holding("LT")).await.is_err());
    assert!(ws.holdings().await.is_empty());

    let mut settings = ws.settings().await;
    settings.debug_mode = true;
    assert!(ws.replace_settings(settings).await.is_err());
    assert!(!ws.settings().await.debug_mode);
}

#[tokio::test]
async fn duplicate_watchlist_entry_is_typed() {
    let ws = Workspace::load(Arc::new(MemoryStore::new())).unwrap();
    let entry = marketdesk::models::WatchlistEntry {
        symbol: "AXISBANK".to_string(),
        name: "Axis Bank".to_string(),
        price: 1023.45,
        change: 0.2,
        day_high: 1030.0,
        day_low: 1010.0,
    };

    ws.add_watchlist_entry(entry.clone()).await.unwrap();
    assert!(matches!(
        ws.add_watchlist_entry(entry).await,
        Err(WorkspaceError::Watchlist(_))
    ));
    assert_eq!(ws.watchlist().await.len(), 1);
}

/// Records which thread each save ran on.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    saves: Mutex<Vec<(StoreKey, ThreadId)>>,
}

impl RecordingStore {
    fn saves(&self) -> Vec<(StoreKey, ThreadId)> {
        self.saves.lock().unwrap().clone()
    }
}

impl StateStore for RecordingStore {
    fn load(&self, key: StoreKey) -> Result<Option<Value>, StoreError> {
        self.inner.load(key)
    }

    fn save(&self, key: StoreKey, value: &Value) -> Result<(), StoreError> {
        self.saves.lock().unwrap().push((key, thread::current().id()));
        self.inner.save(key, value)
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

fn quote(symbol: &str, price: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price,
        previous_close: price,
        open: price,
        high: price,
        low: price,
        volume: 10,
    }
}

#[tokio::test]
async fn saves_run_off_the_runtime_thread() {
    let store = Arc::new(RecordingStore::default());
    let ws = Workspace::load(store.clone()).unwrap();

    ws.add_holding(holding("ITC")).await.unwrap();

    let saves = store.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].0, StoreKey::Portfolio);
    assert_ne!(saves[0].1, thread::current().id());
}

#[tokio::test]
async fn unchanged_alert_evaluation_writes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let ws = Workspace::load(store.clone()).unwrap();
    ws.create_alert(
        NewAlert {
            symbol: "TCS",
            name: "Tata Consultancy Services".to_string(),
            condition: AlertCondition::Above,
            target_price: 3800.0,
            current_price: 3600.0,
        },
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 0).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(store.saves().len(), 1);

    let same = HashMap::from([("TCS".to_string(), quote("TCS", 3600.0))]);
    ws.evaluate_alerts(&same).await.unwrap();
    ws.evaluate_alerts(&HashMap::new()).await.unwrap();
    assert_eq!(store.saves().len(), 1);

    let moved = HashMap::from([("TCS".to_string(), quote("TCS", 3650.5))]);
    ws.evaluate_alerts(&moved).await.unwrap();
    assert_eq!(store.saves().len(), 2);
    assert_eq!(ws.alerts().await[0].current_price, 3650.5);
}

#[tokio::test]
async fn full_precision_prices_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut expected = Vec::new();

    {
        let ws = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap())).unwrap();
        for i in 1..=100u32 {
            let mut h = holding(&format!("S{i}"));
            h.buy_price = 100.0 + f64::from(i) * 16.829_040_150_690_103;
            h.current_price = h.buy_price / 3.0 + 0.1;
            expected.push(h.clone());
            ws.add_holding(h).await.unwrap();
        }
    }

    let ws = Workspace::load(Arc::new(JsonFileStore::open(dir.path()).unwrap())).unwrap();
    assert_eq!(ws.holdings().await, expected);
}
