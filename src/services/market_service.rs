use serde::Serialize;

use crate::models::Quote;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
}

fn mover(q: &Quote) -> Mover {
    Mover {
        symbol: q.symbol.clone(),
        price: q.price,
        change_percent: q.change_percent(),
        volume: q.volume,
    }
}

/// Up to `n` biggest gainers and losers by percent change. Flat quotes are in neither list.
pub fn top_movers(quotes: &[Quote], n: usize) -> Movers {
    let mut all: Vec<Mover> = quotes.iter().filter(|q| q.has_usable_price()).map(mover).collect();
    all.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));

    let gainers = all
        .iter()
        .filter(|m| m.change_percent > 0.0)
        .take(n)
        .cloned()
        .collect();
    let losers = all
        .iter()
        .rev()
        .filter(|m| m.change_percent < 0.0)
        .take(n)
        .cloned()
        .collect();

    Movers { gainers, losers }
}
