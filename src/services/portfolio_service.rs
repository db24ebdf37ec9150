use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Holding, Quote};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingStats {
    pub invested: f64,
    pub current: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub symbol: String,
    pub gain_loss_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_invested: f64,
    pub current_value: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub best_performer: Option<Performer>,
    pub worst_performer: Option<Performer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub symbol: String,
    pub value: f64,
    pub percent: f64,
}

fn pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

pub fn holding_stats(h: &Holding) -> HoldingStats {
    let qty = f64::from(h.quantity);
    let invested = qty * h.buy_price;
    let current = qty * h.current_price;
    let gain_loss = current - invested;

    HoldingStats {
        invested,
        current,
        gain_loss,
        gain_loss_percent: pct(gain_loss, invested),
    }
}

/// Aggregates over the given holdings. Ties for best/worst keep the first holding seen.
pub fn aggregate(holdings: &[Holding]) -> PortfolioStats {
    let mut total_invested = 0.0;
    let mut current_value = 0.0;
    let mut best: Option<(&Holding, f64)> = None;
    let mut worst: Option<(&Holding, f64)> = None;

    for h in holdings {
        let s = holding_stats(h);
        total_invested += s.invested;
        current_value += s.current;

        let p = s.gain_loss_percent;
        if best.is_none_or(|(_, b)| p > b) {
            best = Some((h, p));
        }
        if worst.is_none_or(|(_, w)| p < w) {
            worst = Some((h, p));
        }
    }

    let total_gain_loss = current_value - total_invested;
    let performer = |(h, p): (&Holding, f64)| Performer {
        symbol: h.symbol.clone(),
        gain_loss_percent: p,
    };

    PortfolioStats {
        total_invested,
        current_value,
        total_gain_loss,
        total_gain_loss_percent: pct(total_gain_loss, total_invested),
        best_performer: best.map(performer),
        worst_performer: worst.map(performer),
    }
}

/// Share of current value per holding, in holding order.
pub fn allocation(holdings: &[Holding]) -> Vec<AllocationSlice> {
    let total: f64 = holdings.iter().map(|h| holding_stats(h).current).sum();

    holdings
        .iter()
        .map(|h| {
            let value = holding_stats(h).current;
            AllocationSlice {
                symbol: h.symbol.clone(),
                value,
                percent: pct(value, total),
            }
        })
        .collect()
}

pub fn add_holding(holdings: &[Holding], holding: Holding) -> Vec<Holding> {
    let mut out = holdings.to_vec();
    out.push(holding);
    out
}

/// Removes every lot of `symbol`.
pub fn remove_holding(holdings: &[Holding], symbol: &str) -> Vec<Holding> {
    let sym = symbol.trim().to_uppercase();
    holdings
        .iter()
        .filter(|h| h.symbol != sym)
        .cloned()
        .collect()
}

/// New holding list priced from `quotes`; holdings without a usable quote keep their price.
pub fn refresh_prices(holdings: &[Holding], quotes: &HashMap<String, Quote>) -> Vec<Holding> {
    holdings
        .iter()
        .map(|h| match quotes.get(&h.symbol) {
            Some(q) if q.has_usable_price() => Holding {
                current_price: q.price,
                ..h.clone()
            },
            _ => h.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn holding(symbol: &str, quantity: u32, buy: f64, current: f64) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            quantity,
            buy_price: buy,
            buy_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            current_price: current,
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
            volume: 1,
        }
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let s = aggregate(&[]);
        assert_eq!(s.total_invested, 0.0);
        assert_eq!(s.current_value, 0.0);
        assert_eq!(s.total_gain_loss_percent, 0.0);
        assert!(s.best_performer.is_none());
        assert!(s.worst_performer.is_none());
    }

    #[test]
    fn single_holding_gain() {
        let s = aggregate(&[holding("RELIANCE", 50, 2300.0, 2456.75)]);
        assert_relative_eq!(s.total_gain_loss, 50.0 * (2456.75 - 2300.0), max_relative = 1e-12);
        assert_eq!(s.best_performer.unwrap().symbol, "RELIANCE");
    }

    #[test]
    fn best_and_worst_by_percent() {
        let hs = vec![
            holding("RELIANCE", 50, 2300.0, 2456.75),
            holding("TCS", 25, 3500.0, 3678.90),
            holding("INFY", 75, 1480.0, 1456.20),
        ];
        let s = aggregate(&hs);
        assert_eq!(s.best_performer.unwrap().symbol, "RELIANCE");
        assert_eq!(s.worst_performer.unwrap().symbol, "INFY");
    }

    #[test]
    fn ties_keep_first_seen() {
        let hs = vec![holding("A", 1, 100.0, 110.0), holding("B", 2, 100.0, 110.0)];
        let s = aggregate(&hs);
        assert_eq!(s.best_performer.unwrap().symbol, "A");
        assert_eq!(s.worst_performer.unwrap().symbol, "A");
    }

    #[test]
    fn allocation_sums_to_hundred() {
        let hs = vec![holding("A", 1, 1.0, 30.0), holding("B", 1, 1.0, 70.0)];
        let slices = allocation(&hs);
        assert_relative_eq!(slices[0].percent, 30.0, max_relative = 1e-12);
        assert_relative_eq!(slices.iter().map(|s| s.percent).sum::<f64>(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn remove_drops_every_lot_of_symbol() {
        let hs = vec![
            holding("TCS", 1, 1.0, 1.0),
            holding("INFY", 1, 1.0, 1.0),
            holding("TCS", 2, 1.0, 1.0),
        ];
        let out = remove_holding(&hs, "tcs");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "INFY");
        assert_eq!(hs.len(), 3);
    }

    #[test]
    fn refresh_skips_missing_and_unusable_quotes() {
        let hs = vec![
            holding("TCS", 1, 1.0, 5.0),
            holding("INFY", 1, 1.0, 6.0),
            holding("WIPRO", 1, 1.0, 7.0),
        ];
        let quotes = HashMap::from([
            ("TCS".to_string(), quote("TCS", 9.0)),
            ("INFY".to_string(), quote("INFY", 0.0)),
        ]);
        let out = refresh_prices(&hs, &quotes);
        assert_eq!(out[0].current_price, 9.0);
        assert_eq!(out[1].current_price, 6.0);
        assert_eq!(out[2].current_price, 7.0);
    }
}
