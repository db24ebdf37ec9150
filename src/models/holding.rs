use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,

    pub quantity: u32,
    pub buy_price: f64,
    pub buy_date: NaiveDate,

    // refreshed from quotes
    pub current_price: f64,
}
