//! Static catalog of the NSE listings the dashboard knows about.
//!
//! Reference prices seed synthetic quotes; fundamentals are opaque display data
//! used by the comparison view and are never computed here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    // trillions of rupees
    pub market_cap: f64,
    pub pe: f64,
    pub eps: f64,
    pub dividend: f64,
    pub roe: f64,
    pub debt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStock {
    pub symbol: &'static str,
    pub name: &'static str,
    pub reference_price: f64,
    pub fundamentals: Option<Fundamentals>,
}

const fn stock(symbol: &'static str, name: &'static str, reference_price: f64) -> CatalogStock {
    CatalogStock {
        symbol,
        name,
        reference_price,
        fundamentals: None,
    }
}

const fn with_fundamentals(
    symbol: &'static str,
    name: &'static str,
    reference_price: f64,
    f: Fundamentals,
) -> CatalogStock {
    CatalogStock {
        symbol,
        name,
        reference_price,
        fundamentals: Some(f),
    }
}

pub static STOCKS: &[CatalogStock] = &[
    with_fundamentals(
        "RELIANCE",
        "Reliance Industries",
        2456.75,
        Fundamentals { market_cap: 16.5, pe: 24.5, eps: 98.45, dividend: 0.85, roe: 12.5, debt: 1.2 },
    ),
    with_fundamentals(
        "TCS",
        "Tata Consultancy Services",
        3678.90,
        Fundamentals { market_cap: 13.4, pe: 28.3, eps: 130.20, dividend: 1.2, roe: 42.5, debt: 0.1 },
    ),
    with_fundamentals(
        "HDFCBANK",
        "HDFC Bank",
        1654.30,
        Fundamentals { market_cap: 9.2, pe: 18.7, eps: 88.50, dividend: 0.95, roe: 16.8, debt: 0.8 },
    ),
    with_fundamentals(
        "INFY",
        "Infosys",
        1456.20,
        Fundamentals { market_cap: 6.1, pe: 22.4, eps: 65.00, dividend: 1.5, roe: 28.3, debt: 0.05 },
    ),
    with_fundamentals(
        "ICICIBANK",
        "ICICI Bank",
        987.65,
        Fundamentals { market_cap: 6.9, pe: 16.2, eps: 60.95, dividend: 1.1, roe: 15.2, debt: 0.9 },
    ),
    stock("BHARTIARTL", "Bharti Airtel", 876.45),
    stock("WIPRO", "Wipro", 432.10),
    stock("TATAMOTORS", "Tata Motors", 654.75),
    stock("AXISBANK", "Axis Bank", 1023.45),
    stock("SUNPHARMA", "Sun Pharma", 1145.80),
    stock("ADANIPORTS", "Adani Ports", 789.30),
    stock("LT", "Larsen & Toubro", 3234.50),
    stock("MARUTI", "Maruti Suzuki", 9876.45),
    stock("ASIANPAINT", "Asian Paints", 3456.20),
    stock("ITC", "ITC Limited", 456.30),
    stock("KOTAKBANK", "Kotak Mahindra Bank", 1876.50),
];

pub fn find(symbol: &str) -> Option<&'static CatalogStock> {
    let sym = symbol.trim().to_uppercase();
    STOCKS.iter().find(|s| s.symbol == sym)
}

/// Display name for a symbol, falling back to the symbol itself.
pub fn display_name(symbol: &str) -> String {
    find(symbol)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| symbol.trim().to_uppercase())
}

pub fn symbols() -> Vec<String> {
    STOCKS.iter().map(|s| s.symbol.to_string()).collect()
}
