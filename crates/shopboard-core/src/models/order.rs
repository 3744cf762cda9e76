//! Order-level records

use chrono::NaiveDateTime;
use serde::Serialize;

/// One order line item from the orders table.
///
/// Carries both category fields from the source: `product_category` is the
/// coarse label filters and aggregations run on, `product_category_name`
/// the finer catalog name. They are not interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: String,
    #[serde(rename = "customer_unique_id")]
    pub customer_id: String,
    pub product_category: String,
    pub product_category_name: String,
    #[serde(rename = "order_purchase_timestamp")]
    pub purchased_at: NaiveDateTime,
    pub payment_value: f64,
    /// Whole days between this customer's latest purchase and the latest
    /// purchase in the entire dataset. Written once by the enricher and
    /// stable across filter changes.
    pub recency_days: u32,
}

/// Churn classification of a row against the active threshold.
///
/// Recomputed on demand from `recency_days`; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChurnRisk {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Low Risk")]
    Low,
}

impl ChurnRisk {
    /// High risk iff recency is strictly past the threshold
    pub fn classify(recency_days: u32, threshold_days: u32) -> Self {
        if recency_days > threshold_days {
            ChurnRisk::High
        } else {
            ChurnRisk::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChurnRisk::High => "High Risk",
            ChurnRisk::Low => "Low Risk",
        }
    }
}

impl std::fmt::Display for ChurnRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
