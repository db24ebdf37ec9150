use serde::{Deserialize, Serialize};

/// User-facing dashboard settings. Unknown or missing fields fall back to defaults on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub user_name: String,
    pub user_email: String,

    pub price_alerts: bool,
    pub portfolio_updates: bool,
    pub news_notifications: bool,
    pub email_notifications: bool,

    pub currency: String,
    pub language: String,
    pub date_format: String,
    pub number_format: String,

    pub auto_refresh: bool,
    // seconds
    pub refresh_interval: u64,
    // days
    pub data_retention: u32,

    pub share_data: bool,
    pub analytics: bool,

    pub api_endpoint: String,
    pub cache_enabled: bool,
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            user_name: "Stock Trader".to_string(),
            user_email: "trader@example.com".to_string(),
            price_alerts: true,
            portfolio_updates: true,
            news_notifications: false,
            email_notifications: false,
            currency: "INR".to_string(),
            language: "en".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            number_format: "indian".to_string(),
            auto_refresh: true,
            refresh_interval: 3,
            data_retention: 30,
            share_data: false,
            analytics: true,
            api_endpoint: "default".to_string(),
            cache_enabled: true,
            debug_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults_for_missing_fields() {
        let s: AppSettings =
            serde_json::from_str(r#"{"userName":"Asha","refreshInterval":10}"#).unwrap();
        assert_eq!(s.user_name, "Asha");
        assert_eq!(s.refresh_interval, 10);
        assert_eq!(s.currency, "INR");
        assert!(s.auto_refresh);
    }
}
