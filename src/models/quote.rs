use serde::{Deserialize, Serialize};

/// Point-in-time price snapshot for one symbol. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl Quote {
    pub fn change(&self) -> f64 {
        self.price - self.previous_close
    }

    pub fn change_percent(&self) -> f64 {
        if self.previous_close == 0.0 {
            return 0.0;
        }
        self.change() / self.previous_close * 100.0
    }

    /// A quote is usable for pricing only if it carries a finite, positive price.
    pub fn has_usable_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexName {
    Nifty,
    Sensex,
}

impl IndexName {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexName::Nifty => "NIFTY",
            IndexName::Sensex => "SENSEX",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub name: IndexName,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}
