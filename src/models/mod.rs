pub mod quote;
pub mod holding;
pub mod alert;
pub mod watchlist;
pub mod app_settings;
pub mod catalog;

pub use quote::{IndexName, IndexSnapshot, Quote};
pub use holding::Holding;
pub use alert::{Alert, AlertCondition, AlertStatus, TriggeredAlert};
pub use watchlist::WatchlistEntry;
pub use app_settings::AppSettings;
pub use catalog::CatalogStock;
