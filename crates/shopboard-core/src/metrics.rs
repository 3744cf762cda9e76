//! Summary metrics over a filtered orders view
//!
//! All aggregation is hand-rolled over row slices with ordinary maps and
//! sorts. Every rate and average guards its empty and divide-by-zero case
//! to a defined zero; an empty view produces an all-zero `Metrics`, never
//! an error.

use crate::models::Order;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Order counts per calendar date and coarse category, feeding the
/// activity heatmap. Both key levels iterate sorted.
pub type ActivityMatrix = BTreeMap<NaiveDate, BTreeMap<String, u64>>;

/// Summary metrics for one filtered orders view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Distinct customers in the view
    pub total_customers: usize,
    /// Rows in the view, one per order line item
    pub total_orders: usize,
    pub total_revenue: f64,
    /// Revenue per row; 0 on an empty view, never NaN
    pub avg_order_value: f64,
    /// Percent of order rows past the churn threshold over distinct
    /// customers; 0 when the view has no customers
    pub churn_rate: f64,
    /// Most frequent coarse category; ties break to the lowest name
    /// alphabetically, `None` on an empty view
    pub top_category: Option<String>,
    /// Revenue per coarse category present in the view
    pub category_revenue: BTreeMap<String, f64>,
    pub activity_matrix: ActivityMatrix,
}

/// Compute all summary metrics for an orders view against the active
/// churn threshold
pub fn summarize(orders_view: &[&Order], churn_threshold_days: u32) -> Metrics {
    let total_orders = orders_view.len();

    let customers: HashSet<&str> = orders_view
        .iter()
        .map(|o| o.customer_id.as_str())
        .collect();
    let total_customers = customers.len();

    let total_revenue: f64 = orders_view.iter().map(|o| o.payment_value).sum();

    let avg_order_value = if total_orders == 0 {
        0.0
    } else {
        total_revenue / total_orders as f64
    };

    let rows_over_threshold = orders_view
        .iter()
        .filter(|o| o.recency_days > churn_threshold_days)
        .count();
    let churn_rate = if total_customers == 0 {
        0.0
    } else {
        100.0 * rows_over_threshold as f64 / total_customers as f64
    };

    let mut category_counts: HashMap<&str, u64> = HashMap::new();
    let mut category_revenue: BTreeMap<String, f64> = BTreeMap::new();
    let mut activity_matrix: ActivityMatrix = BTreeMap::new();

    for order in orders_view {
        *category_counts
            .entry(order.product_category.as_str())
            .or_default() += 1;
        *category_revenue
            .entry(order.product_category.clone())
            .or_default() += order.payment_value;
        *activity_matrix
            .entry(order.purchased_at.date())
            .or_default()
            .entry(order.product_category.clone())
            .or_default() += 1;
    }

    Metrics {
        total_customers,
        total_orders,
        total_revenue,
        avg_order_value,
        churn_rate,
        top_category: top_category(&category_counts),
        category_revenue,
        activity_matrix,
    }
}

/// Most frequent category; ties break to the lowest name alphabetically
fn top_category(counts: &HashMap<&str, u64>) -> Option<String> {
    counts
        .iter()
        .max_by(|(a_name, a_count), (b_name, b_count)| {
            a_count.cmp(b_count).then_with(|| b_name.cmp(a_name))
        })
        .map(|(name, _)| (*name).to_string())
}
