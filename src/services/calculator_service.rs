//! Closed-form investment calculators.
//!
//! Inputs are validated by the caller. Degenerate inputs (zero rate, zero
//! principal, zero horizon) are special-cased so no result is ever NaN or
//! infinite.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub future_value: f64,
    pub invested: f64,
    pub returns: f64,
    pub return_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlan {
    pub monthly_required: f64,
    pub current_growth: f64,
    pub gap: f64,
    pub achievable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    pub buy_value: f64,
    pub sell_value: f64,
    pub brokerage: f64,
    #[serde(rename = "netPL")]
    pub net_pl: f64,
    #[serde(rename = "plPercent")]
    pub pl_percent: f64,
    pub is_profit: bool,
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Future value of one unit paid at the start of each month for `months` months.
fn annuity_due_factor(monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate == 0.0 {
        return months;
    }
    ((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

fn projection(future_value: f64, invested: f64) -> Projection {
    let returns = future_value - invested;
    Projection {
        future_value,
        invested,
        returns,
        return_percent: percent_of(returns, invested),
    }
}

/// Systematic monthly investment compounded monthly.
pub fn sip(monthly_investment: f64, annual_rate_percent: f64, years: f64) -> Projection {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let months = years * 12.0;

    let future_value = monthly_investment * annuity_due_factor(monthly_rate, months);
    let invested = monthly_investment * months;

    projection(future_value, invested)
}

/// Single upfront investment compounded annually.
pub fn lumpsum(principal: f64, annual_rate_percent: f64, years: f64) -> Projection {
    let future_value = principal * (1.0 + annual_rate_percent / 100.0).powf(years);
    projection(future_value, principal)
}

/// Monthly contribution needed on top of `current_amount` to reach `target_amount`.
///
/// When the current amount already grows past the target, the plan is
/// achievable and both `gap` and `monthly_required` are reported as zero.
pub fn target_gap(
    target_amount: f64,
    current_amount: f64,
    annual_rate_percent: f64,
    years: f64,
) -> TargetPlan {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let months = years * 12.0;

    let current_growth = current_amount * (1.0 + annual_rate_percent / 100.0).powf(years);
    let remaining = target_amount - current_growth;
    let achievable = remaining <= 0.0;

    if achievable {
        return TargetPlan {
            monthly_required: 0.0,
            current_growth,
            gap: 0.0,
            achievable,
        };
    }

    let factor = annuity_due_factor(monthly_rate, months);
    let monthly_required = if factor > 0.0 { remaining / factor } else { 0.0 };

    TargetPlan {
        monthly_required,
        current_growth,
        gap: remaining,
        achievable,
    }
}

/// Net result of a round-trip trade; brokerage is charged on both legs.
pub fn profit_loss(buy_price: f64, sell_price: f64, quantity: f64, brokerage_percent: f64) -> ProfitLoss {
    let buy_value = buy_price * quantity;
    let sell_value = sell_price * quantity;
    let brokerage = (buy_value + sell_value) * (brokerage_percent / 100.0);
    let net_pl = sell_value - buy_value - brokerage;

    ProfitLoss {
        buy_value,
        sell_value,
        brokerage,
        net_pl,
        pl_percent: percent_of(net_pl, buy_value),
        is_profit: net_pl >= 0.0,
    }
}
