//! Daily revenue trend for the economic view
//!
//! Aggregates the filtered orders view by calendar date into vectors
//! aligned by index, ready for a line chart.

use crate::models::Order;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Time series of revenue and order volume
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueTrend {
    /// Calendar dates present in the view, sorted ascending
    pub dates: Vec<NaiveDate>,
    /// Revenue per date (aligned with `dates`)
    pub daily_revenue: Vec<f64>,
    /// Order rows per date (aligned with `dates`)
    pub daily_orders: Vec<u64>,
}

impl RevenueTrend {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Default)]
struct DailyAggregate {
    revenue: f64,
    orders: u64,
}

/// Aggregate an orders view by calendar date
pub fn revenue_trend(orders_view: &[&Order]) -> RevenueTrend {
    let mut daily: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();

    for order in orders_view {
        let agg = daily.entry(order.purchased_at.date()).or_default();
        agg.revenue += order.payment_value;
        agg.orders += 1;
    }

    let dates: Vec<NaiveDate> = daily.keys().copied().collect();
    let daily_revenue = daily.values().map(|a| a.revenue).collect();
    let daily_orders = daily.values().map(|a| a.orders).collect();

    RevenueTrend {
        dates,
        daily_revenue,
        daily_orders,
    }
}
