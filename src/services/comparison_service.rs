//! Side-by-side fundamentals for a handful of catalog stocks.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::catalog::{self, CatalogStock, Fundamentals};

pub const MAX_COMPARED: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("at most 4 stocks can be compared")]
    TooMany,
    #[error("{0} is selected twice")]
    Duplicate(String),
    #[error("no fundamentals available for {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub metric: &'static str,
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub stocks: Vec<CatalogStock>,
    pub metrics: Vec<MetricRow>,
}

const METRICS: [&str; 6] = [
    "Market Cap (₹T)",
    "P/E Ratio",
    "EPS (₹)",
    "Dividend Yield (%)",
    "ROE (%)",
    "Debt/Equity",
];

// Same order as METRICS.
fn metric_values(f: &Fundamentals) -> [f64; 6] {
    [f.market_cap, f.pe, f.eps, f.dividend, f.roe, f.debt]
}

pub fn compare(symbols: &[String]) -> Result<Comparison, CompareError> {
    if symbols.len() > MAX_COMPARED {
        return Err(CompareError::TooMany);
    }

    let mut selected: Vec<(CatalogStock, Fundamentals)> = Vec::with_capacity(symbols.len());
    for raw in symbols {
        let sym = raw.trim().to_uppercase();
        if selected.iter().any(|(s, _)| s.symbol == sym) {
            return Err(CompareError::Duplicate(sym));
        }
        match catalog::find(&sym) {
            Some(stock) => match stock.fundamentals {
                Some(f) => selected.push((*stock, f)),
                None => return Err(CompareError::Unknown(sym)),
            },
            None => return Err(CompareError::Unknown(sym)),
        }
    }

    let metrics = METRICS
        .into_iter()
        .enumerate()
        .map(|(i, metric)| MetricRow {
            metric,
            values: selected
                .iter()
                .map(|(s, f)| (s.symbol.to_string(), metric_values(f)[i]))
                .collect(),
        })
        .collect();

    Ok(Comparison {
        stocks: selected.into_iter().map(|(s, _)| s).collect(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_one_row_per_metric() {
        let c = compare(&syms(&["RELIANCE", "tcs"])).unwrap();
        assert_eq!(c.stocks.len(), 2);
        assert_eq!(c.metrics.len(), 6);
        assert_eq!(c.metrics[5].metric, "Debt/Equity");
        assert_eq!(c.metrics[5].values["RELIANCE"], 1.2);
        assert_eq!(c.metrics[1].metric, "P/E Ratio");
        assert_eq!(c.metrics[1].values["TCS"], 28.3);
    }

    #[test]
    fn rejects_bad_selections() {
        assert_eq!(
            compare(&syms(&["TCS", "INFY", "RELIANCE", "HDFCBANK", "ICICIBANK"])),
            Err(CompareError::TooMany)
        );
        assert_eq!(
            compare(&syms(&["TCS", "tcs"])),
            Err(CompareError::Duplicate("TCS".into()))
        );
        assert_eq!(compare(&syms(&["WIPRO"])), Err(CompareError::Unknown("WIPRO".into())));
    }
}
