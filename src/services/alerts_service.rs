use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Alert, AlertCondition, AlertStatus, Quote, TriggeredAlert};

/// Progress at or above this percentage counts an active alert as near its target.
pub const NEAR_TARGET_PERCENT: f64 = 90.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub updated_alerts: Vec<Alert>,
    pub newly_triggered: Vec<TriggeredAlert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub active: usize,
    pub triggered: usize,
    pub near_target: usize,
}

pub fn is_hit(condition: AlertCondition, price: f64, target: f64) -> bool {
    match condition {
        AlertCondition::Above => price >= target,
        AlertCondition::Below => price <= target,
    }
}

/// Applies the latest quotes to every alert and fires the active ones whose
/// condition now holds.
///
/// Triggered alerts still receive price updates but are never re-armed or
/// re-emitted. Symbols without a usable quote keep their previous price.
pub fn evaluate(alerts: &[Alert], quotes: &HashMap<String, Quote>) -> Evaluation {
    let mut newly_triggered = Vec::new();

    let updated_alerts = alerts
        .iter()
        .map(|a| {
            let price = match quotes.get(&a.symbol) {
                Some(q) if q.has_usable_price() => q.price,
                _ => a.current_price,
            };

            let mut next = Alert {
                current_price: price,
                ..a.clone()
            };

            if a.is_active() && is_hit(a.condition, price, a.target_price) {
                next.status = AlertStatus::Triggered;
                newly_triggered.push(TriggeredAlert {
                    alert: next.clone(),
                    triggered_price: price,
                });
            }

            next
        })
        .collect();

    Evaluation {
        updated_alerts,
        newly_triggered,
    }
}

/// How close the price is to the target, capped at 100. Display only.
pub fn progress(alert: &Alert) -> f64 {
    let (num, den) = match alert.condition {
        AlertCondition::Above => (alert.current_price, alert.target_price),
        AlertCondition::Below => (alert.target_price, alert.current_price),
    };

    if den <= 0.0 {
        return 100.0;
    }
    (num / den * 100.0).min(100.0)
}

pub fn distance(alert: &Alert) -> f64 {
    (alert.current_price - alert.target_price).abs()
}

pub fn stats(alerts: &[Alert]) -> AlertStats {
    alerts.iter().fold(AlertStats::default(), |mut s, a| {
        match a.status {
            AlertStatus::Active => {
                s.active += 1;
                if progress(a) >= NEAR_TARGET_PERCENT {
                    s.near_target += 1;
                }
            }
            AlertStatus::Triggered => s.triggered += 1,
        }
        s
    })
}

/// Id for a new alert: creation time in millis, bumped past any id already in use.
/// If the largest id is `u64::MAX`, the lowest free id is used instead.
fn next_id(alerts: &[Alert], now: DateTime<Utc>) -> u64 {
    let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let max_used = alerts.iter().map(|a| a.id).max();

    match max_used {
        None => stamp,
        Some(max) => match max.checked_add(1) {
            Some(next) => stamp.max(next),
            None => lowest_free_id(alerts),
        },
    }
}

fn lowest_free_id(alerts: &[Alert]) -> u64 {
    let mut used: Vec<u64> = alerts.iter().map(|a| a.id).collect();
    used.sort_unstable();
    used.dedup();

    // ids start at 1; the first gap in the sorted list is free
    let mut candidate = 1;
    for id in used {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }
    candidate
}

pub struct NewAlert<'a> {
    pub symbol: &'a str,
    pub name: String,
    pub condition: AlertCondition,
    pub target_price: f64,
    pub current_price: f64,
}

pub fn create_alert(alerts: &[Alert], new: NewAlert<'_>, now: DateTime<Utc>) -> (Vec<Alert>, Alert) {
    let alert = Alert {
        id: next_id(alerts, now),
        symbol: new.symbol.trim().to_uppercase(),
        name: new.name,
        condition: new.condition,
        target_price: new.target_price,
        current_price: new.current_price,
        status: AlertStatus::Active,
        created_at: now,
    };

    let mut out = alerts.to_vec();
    out.push(alert.clone());
    (out, alert)
}

/// Returns the remaining alerts and whether anything was removed.
pub fn delete_alert(alerts: &[Alert], id: u64) -> (Vec<Alert>, bool) {
    let out: Vec<Alert> = alerts.iter().filter(|a| a.id != id).cloned().collect();
    let removed = out.len() != alerts.len();
    (out, removed)
}
