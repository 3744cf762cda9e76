//! Dashboard views and their chart-ready frames
//!
//! One frame is produced per selection change, for the active view only;
//! nothing is precomputed for inactive views. Frames serialize to JSON
//! for the rendering collaborator.

use crate::charts::{self, ChartData, ChurnBreakdown, HeatmapMatrix, ScatterPoint, TreemapSlice};
use crate::filter::FilteredView;
use crate::metrics::{self, Metrics};
use crate::trends::{self, RevenueTrend};
use serde::Serialize;

/// The dashboard's three tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    CustomerInsights,
    ProductAnalysis,
    EconomicTrends,
}

impl View {
    pub const ALL: [View; 3] = [
        View::CustomerInsights,
        View::ProductAnalysis,
        View::EconomicTrends,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::CustomerInsights => "Customer Insights",
            View::ProductAnalysis => "Product Analysis",
            View::EconomicTrends => "Economic Trends",
        }
    }
}

/// Everything the rendering layer needs for one view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewFrame {
    CustomerInsights {
        metrics: Metrics,
        scatter: ChartData<Vec<ScatterPoint>>,
        churn: ChartData<ChurnBreakdown>,
    },
    ProductAnalysis {
        metrics: Metrics,
        heatmap: ChartData<HeatmapMatrix>,
        treemap: ChartData<Vec<TreemapSlice>>,
    },
    EconomicTrends {
        metrics: Metrics,
        revenue: ChartData<RevenueTrend>,
    },
}

impl ViewFrame {
    pub fn metrics(&self) -> &Metrics {
        match self {
            ViewFrame::CustomerInsights { metrics, .. }
            | ViewFrame::ProductAnalysis { metrics, .. }
            | ViewFrame::EconomicTrends { metrics, .. } => metrics,
        }
    }
}

/// Run Aggregate → Adapt over already-filtered views for one tab
pub fn render(view: View, filtered: &FilteredView<'_>, churn_threshold_days: u32) -> ViewFrame {
    let metrics = metrics::summarize(&filtered.orders, churn_threshold_days);

    match view {
        View::CustomerInsights => ViewFrame::CustomerInsights {
            scatter: charts::scatter_series(&filtered.segments),
            churn: charts::churn_pie(&filtered.orders, churn_threshold_days),
            metrics,
        },
        View::ProductAnalysis => ViewFrame::ProductAnalysis {
            heatmap: charts::heatmap_matrix(&metrics.activity_matrix),
            treemap: charts::treemap_series(&metrics.category_revenue),
            metrics,
        },
        View::EconomicTrends => ViewFrame::EconomicTrends {
            revenue: charts::revenue_series(&trends::revenue_trend(&filtered.orders)),
            metrics,
        },
    }
}
