//! Customer-level records: segments and lifetime value

use serde::{Deserialize, Serialize};

/// Cohort label assigned to each customer by the upstream segmentation job.
///
/// The set is closed: a label outside it in the segments table is a schema
/// error at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Loyal Customers")]
    LoyalCustomers,
    #[serde(rename = "Potential Loyalists")]
    PotentialLoyalists,
    #[serde(rename = "At Risk Customers")]
    AtRiskCustomers,
    #[serde(rename = "Hibernating Customers")]
    HibernatingCustomers,
    #[serde(rename = "Lost Customers")]
    LostCustomers,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::LoyalCustomers,
        Segment::PotentialLoyalists,
        Segment::AtRiskCustomers,
        Segment::HibernatingCustomers,
        Segment::LostCustomers,
    ];

    /// Parse the label used in the segments table and in UI selections
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Loyal Customers" => Some(Segment::LoyalCustomers),
            "Potential Loyalists" => Some(Segment::PotentialLoyalists),
            "At Risk Customers" => Some(Segment::AtRiskCustomers),
            "Hibernating Customers" => Some(Segment::HibernatingCustomers),
            "Lost Customers" => Some(Segment::LostCustomers),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Segment::LoyalCustomers => "Loyal Customers",
            Segment::PotentialLoyalists => "Potential Loyalists",
            Segment::AtRiskCustomers => "At Risk Customers",
            Segment::HibernatingCustomers => "Hibernating Customers",
            Segment::LostCustomers => "Lost Customers",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row per customer in the segments table.
///
/// Many order rows reference one segment row via `customer_id`, but the
/// join is never materialized; order and segment filtering stay
/// independent views over the same selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    #[serde(rename = "customer_unique_id")]
    pub customer_id: String,
    pub segment: Segment,
    /// Order count for this customer
    pub frequency: u32,
    pub total_spending: f64,
}

/// Lifetime-value table, loaded but not consumed by any current view.
///
/// Kept as raw headers and rows so future views can interpret it; the
/// pipeline treats it as an opaque pass-through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ClvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
