//! Chart-shaped payloads for the rendering layer
//!
//! Adapters only reshape already-aggregated data; no aggregation lives
//! here. Every adapter tags a zero-row input as `ChartData::Empty` so the
//! rendering layer shows a placeholder instead of an empty chart.

use crate::metrics::ActivityMatrix;
use crate::models::{ChurnRisk, CustomerSegment, Order, Segment};
use crate::trends::RevenueTrend;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A chart payload, or the empty-series tag.
///
/// `Empty` is a result, not an error: the selection legitimately produced
/// zero rows and the caller recovers by rendering a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "series", rename_all = "snake_case")]
pub enum ChartData<T> {
    Empty,
    Ready(T),
}

impl<T> ChartData<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::Empty)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartData::Ready(series) => Some(series),
            ChartData::Empty => None,
        }
    }
}

/// One customer in the frequency × spending scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Order count
    pub x: u32,
    /// Total spending
    pub y: f64,
    pub label: Segment,
    pub id: String,
}

/// Frequency vs. total spending per customer, labeled by segment.
/// Read straight from the segments view, never derived from orders.
pub fn scatter_series(segments_view: &[&CustomerSegment]) -> ChartData<Vec<ScatterPoint>> {
    if segments_view.is_empty() {
        return ChartData::Empty;
    }

    ChartData::Ready(
        segments_view
            .iter()
            .map(|c| ScatterPoint {
                x: c.frequency,
                y: c.total_spending,
                label: c.segment,
                id: c.customer_id.clone(),
            })
            .collect(),
    )
}

/// Row counts per churn class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChurnBreakdown {
    pub high_risk: u64,
    pub low_risk: u64,
}

/// Classify every order row against the threshold. The classification is
/// recomputed here each time; nothing is stored on the rows.
pub fn churn_pie(orders_view: &[&Order], churn_threshold_days: u32) -> ChartData<ChurnBreakdown> {
    if orders_view.is_empty() {
        return ChartData::Empty;
    }

    let mut breakdown = ChurnBreakdown {
        high_risk: 0,
        low_risk: 0,
    };
    for order in orders_view {
        match ChurnRisk::classify(order.recency_days, churn_threshold_days) {
            ChurnRisk::High => breakdown.high_risk += 1,
            ChurnRisk::Low => breakdown.low_risk += 1,
        }
    }

    ChartData::Ready(breakdown)
}

/// Dense date × category grid; missing cells are zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    /// Row index: sorted unique dates
    pub dates: Vec<NaiveDate>,
    /// Column index: sorted unique categories
    pub categories: Vec<String>,
    /// `cells[row][col]` = order count for (date, category)
    pub cells: Vec<Vec<u64>>,
}

pub fn heatmap_matrix(activity: &ActivityMatrix) -> ChartData<HeatmapMatrix> {
    if activity.is_empty() {
        return ChartData::Empty;
    }

    let dates: Vec<NaiveDate> = activity.keys().copied().collect();
    let categories: Vec<String> = activity
        .values()
        .flat_map(|by_category| by_category.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = dates
        .iter()
        .map(|date| {
            let by_category = &activity[date];
            categories
                .iter()
                .map(|category| by_category.get(category).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    ChartData::Ready(HeatmapMatrix {
        dates,
        categories,
        cells,
    })
}

/// One treemap tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapSlice {
    pub category: String,
    pub revenue: f64,
}

/// Revenue per category, largest first; equal revenues order by category
/// name so the layout is stable across renders
pub fn treemap_series(category_revenue: &BTreeMap<String, f64>) -> ChartData<Vec<TreemapSlice>> {
    if category_revenue.is_empty() {
        return ChartData::Empty;
    }

    let mut slices: Vec<TreemapSlice> = category_revenue
        .iter()
        .map(|(category, revenue)| TreemapSlice {
            category: category.clone(),
            revenue: *revenue,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    ChartData::Ready(slices)
}

/// Line series for the economic view
pub fn revenue_series(trend: &RevenueTrend) -> ChartData<RevenueTrend> {
    if trend.is_empty() {
        return ChartData::Empty;
    }
    ChartData::Ready(trend.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use chrono::NaiveDateTime;

    fn order(customer_id: &str, category: &str, ts: &str, payment: f64, recency: u32) -> Order {
        Order {
            order_id: format!("{}-{}", customer_id, ts),
            customer_id: customer_id.to_string(),
            product_category: category.to_string(),
            product_category_name: format!("{}_fine", category),
            purchased_at: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            payment_value: payment,
            recency_days: recency,
        }
    }

    fn segment_row(customer_id: &str, frequency: u32, spending: f64) -> CustomerSegment {
        CustomerSegment {
            customer_id: customer_id.to_string(),
            segment: Segment::LoyalCustomers,
            frequency,
            total_spending: spending,
        }
    }

    #[test]
    fn test_empty_inputs_tag_empty() {
        assert!(scatter_series(&[]).is_empty());
        assert!(churn_pie(&[], 180).is_empty());
        assert!(heatmap_matrix(&ActivityMatrix::new()).is_empty());
        assert!(treemap_series(&BTreeMap::new()).is_empty());
        assert!(revenue_series(&RevenueTrend::default()).is_empty());
    }

    #[test]
    fn test_scatter_maps_fields() {
        let rows = vec![segment_row("cust-a", 4, 320.0)];
        let view: Vec<&CustomerSegment> = rows.iter().collect();

        let series = scatter_series(&view);
        let points = series.ready().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 4);
        assert!((points[0].y - 320.0).abs() < 1e-9);
        assert_eq!(points[0].label, Segment::LoyalCustomers);
        assert_eq!(points[0].id, "cust-a");
    }

    #[test]
    fn test_churn_pie_recomputes_per_row() {
        let orders = vec![
            order("a", "electronics", "2024-01-01 10:00:00", 10.0, 200),
            order("b", "electronics", "2024-01-02 10:00:00", 10.0, 100),
            order("c", "electronics", "2024-01-03 10:00:00", 10.0, 181),
        ];
        let view: Vec<&Order> = orders.iter().collect();

        let pie = churn_pie(&view, 180);
        assert_eq!(
            pie.ready().copied().unwrap(),
            ChurnBreakdown {
                high_risk: 2,
                low_risk: 1
            }
        );
    }

    #[test]
    fn test_treemap_descending_revenue() {
        let mut revenue = BTreeMap::new();
        revenue.insert("electronics".to_string(), 300.0);
        revenue.insert("furniture_decor".to_string(), 700.0);

        let series = treemap_series(&revenue);
        let slices = series.ready().unwrap();
        assert_eq!(slices[0].category, "furniture_decor");
        assert!((slices[0].revenue - 700.0).abs() < 1e-9);
        assert_eq!(slices[1].category, "electronics");
    }

    #[test]
    fn test_treemap_ties_order_by_name() {
        let mut revenue = BTreeMap::new();
        revenue.insert("toys".to_string(), 100.0);
        revenue.insert("books".to_string(), 100.0);

        let series = treemap_series(&revenue);
        let slices = series.ready().unwrap();
        assert_eq!(slices[0].category, "books");
        assert_eq!(slices[1].category, "toys");
    }

    #[test]
    fn test_heatmap_round_trip_sums() {
        // 3 dates x 2 categories with gaps; grid totals must match the
        // per-date and per-category totals of the source matrix
        let orders = vec![
            order("a", "electronics", "2024-01-01 10:00:00", 10.0, 0),
            order("b", "electronics", "2024-01-01 11:00:00", 10.0, 0),
            order("c", "health_beauty", "2024-01-02 10:00:00", 10.0, 0),
            order("d", "electronics", "2024-01-03 10:00:00", 10.0, 0),
            order("e", "health_beauty", "2024-01-03 11:00:00", 10.0, 0),
        ];
        let view: Vec<&Order> = orders.iter().collect();
        let activity = metrics::summarize(&view, 180).activity_matrix;

        let series = heatmap_matrix(&activity);
        let grid = series.ready().unwrap();

        assert_eq!(grid.dates.len(), 3);
        assert_eq!(grid.categories, vec!["electronics", "health_beauty"]);

        for (row, date) in grid.dates.iter().enumerate() {
            let row_sum: u64 = grid.cells[row].iter().sum();
            let expected: u64 = activity[date].values().sum();
            assert_eq!(row_sum, expected, "row sum mismatch for {}", date);
        }

        for (col, category) in grid.categories.iter().enumerate() {
            let col_sum: u64 = grid.cells.iter().map(|row| row[col]).sum();
            let expected: u64 = activity
                .values()
                .filter_map(|by_category| by_category.get(category))
                .sum();
            assert_eq!(col_sum, expected, "column sum mismatch for {}", category);
        }

        // missing (2024-01-02, electronics) cell reads zero
        assert_eq!(grid.cells[1][0], 0);
    }
}
