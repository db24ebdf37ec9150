use std::env;
use std::path::PathBuf;

use crate::services::quote_source::DEFAULT_YAHOO_CHART_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteProviderKind {
    Yahoo,
    Offline,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,

    pub quote_provider: QuoteProviderKind,
    pub quote_api_base: String,

    /// Overrides the `refreshInterval` app setting when present.
    pub refresh_secs: Option<u64>,
    pub alert_refresh_secs: u64,
}

fn parse_provider(raw: &str) -> QuoteProviderKind {
    match raw.trim().to_ascii_lowercase().as_str() {
        "offline" | "synthetic" => QuoteProviderKind::Offline,
        _ => QuoteProviderKind::Yahoo,
    }
}

fn positive_secs(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).filter(|n| *n > 0)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    let quote_provider = env::var("QUOTE_PROVIDER")
        .map(|s| parse_provider(&s))
        .unwrap_or(QuoteProviderKind::Yahoo);

    let quote_api_base = env::var("QUOTE_API_BASE").unwrap_or_else(|_| DEFAULT_YAHOO_CHART_URL.to_string());

    let refresh_secs = positive_secs(env::var("REFRESH_SECS").ok());
    let alert_refresh_secs = positive_secs(env::var("ALERT_REFRESH_SECS").ok()).unwrap_or(3);

    Settings {
        host,
        port,
        data_dir,
        quote_provider,
        quote_api_base,
        refresh_secs,
        alert_refresh_secs,
    }
}

impl Settings {
    /// Defaults without touching the environment; used by tests.
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: data_dir.into(),
            quote_provider: QuoteProviderKind::Offline,
            quote_api_base: DEFAULT_YAHOO_CHART_URL.to_string(),
            refresh_secs: None,
            alert_refresh_secs: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names() {
        assert_eq!(parse_provider("OFFLINE"), QuoteProviderKind::Offline);
        assert_eq!(parse_provider("yahoo"), QuoteProviderKind::Yahoo);
        assert_eq!(parse_provider("anything"), QuoteProviderKind::Yahoo);
    }

    #[test]
    fn zero_or_garbage_seconds_are_ignored() {
        assert_eq!(positive_secs(Some("5".into())), Some(5));
        assert_eq!(positive_secs(Some("0".into())), None);
        assert_eq!(positive_secs(Some("soon".into())), None);
        assert_eq!(positive_secs(None), None);
    }
}
