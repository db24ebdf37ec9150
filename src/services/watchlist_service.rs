use std::collections::HashMap;

use crate::models::{Quote, WatchlistEntry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchlistError {
    #[error("{0} is already in the watchlist")]
    AlreadyPresent(String),
}

/// Watchlist row seeded from a quote.
pub fn entry_from_quote(name: String, q: &Quote) -> WatchlistEntry {
    WatchlistEntry {
        symbol: q.symbol.trim().to_uppercase(),
        name,
        price: q.price,
        change: q.change_percent(),
        day_high: q.high,
        day_low: q.low,
    }
}

pub fn contains(list: &[WatchlistEntry], symbol: &str) -> bool {
    let sym = symbol.trim().to_uppercase();
    list.iter().any(|e| e.symbol == sym)
}

pub fn add_entry(
    list: &[WatchlistEntry],
    entry: WatchlistEntry,
) -> Result<Vec<WatchlistEntry>, WatchlistError> {
    let symbol = entry.symbol.trim().to_uppercase();
    if contains(list, &symbol) {
        return Err(WatchlistError::AlreadyPresent(symbol));
    }

    let mut out = list.to_vec();
    out.push(WatchlistEntry { symbol, ..entry });
    Ok(out)
}

pub fn remove_entry(list: &[WatchlistEntry], symbol: &str) -> Vec<WatchlistEntry> {
    let sym = symbol.trim().to_uppercase();
    list.iter().filter(|e| e.symbol != sym).cloned().collect()
}

pub fn refresh_entries(
    list: &[WatchlistEntry],
    quotes: &HashMap<String, Quote>,
) -> Vec<WatchlistEntry> {
    list.iter()
        .map(|e| match quotes.get(&e.symbol) {
            Some(q) if q.has_usable_price() => entry_from_quote(e.name.clone(), q),
            _ => e.clone(),
        })
        .collect()
}
