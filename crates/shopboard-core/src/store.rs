//! Process-wide snapshot and per-session dashboard state
//!
//! The three tables are loaded once per process and shared immutably;
//! read-only sharing across sessions needs no locking. Each session owns
//! its selection, churn threshold, and active view, and re-runs the
//! pipeline when any of them change.

use crate::datasource::{Dataset, DatasetLoader, SourceConfig};
use crate::error::CoreError;
use crate::filter::{self, Selection};
use crate::models::Segment;
use crate::view::{render, View, ViewFrame};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

static SNAPSHOT: OnceCell<Arc<Dataset>> = OnceCell::new();

/// Load the dataset once per process and return the shared snapshot.
///
/// The cache is keyed on the process, not the argument: later calls
/// return the first snapshot without touching storage. Invalidation is
/// process restart.
pub fn snapshot(config: &SourceConfig) -> Result<Arc<Dataset>, CoreError> {
    SNAPSHOT
        .get_or_try_init(|| {
            info!(orders = %config.orders_path.display(), "Initializing dataset snapshot");
            DatasetLoader::new(config.clone()).load().map(Arc::new)
        })
        .cloned()
}

/// Recommended slider bounds for the churn threshold
pub const CHURN_THRESHOLD_MIN: u32 = 30;
pub const CHURN_THRESHOLD_MAX: u32 = 365;
pub const DEFAULT_CHURN_THRESHOLD: u32 = 180;

/// Starter categories shown before the user touches the filters
pub const DEFAULT_CATEGORIES: [&str; 3] = ["electronics", "furniture_decor", "health_beauty"];

/// Starter segments shown before the user touches the filters
pub const DEFAULT_SEGMENTS: [Segment; 2] = [Segment::LoyalCustomers, Segment::PotentialLoyalists];

/// The selection a fresh session starts from: the dataset's full date
/// span with the starter categories and segments
pub fn default_selection(dataset: &Dataset) -> Selection {
    let (date_from, date_to) = dataset.date_span().unwrap_or_default();
    Selection::new(
        date_from,
        date_to,
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        DEFAULT_SEGMENTS.into_iter().collect(),
    )
}

/// One user's dashboard state over the shared snapshot
#[derive(Debug, Clone)]
pub struct SessionState {
    dataset: Arc<Dataset>,
    selection: Selection,
    churn_threshold_days: u32,
    active_view: View,
}

impl SessionState {
    pub fn new(dataset: Arc<Dataset>, selection: Selection) -> Self {
        Self {
            dataset,
            selection,
            churn_threshold_days: DEFAULT_CHURN_THRESHOLD,
            active_view: View::CustomerInsights,
        }
    }

    /// Fresh session with the starter selection
    pub fn with_defaults(dataset: Arc<Dataset>) -> Self {
        let selection = default_selection(&dataset);
        Self::new(dataset, selection)
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn churn_threshold_days(&self) -> u32 {
        self.churn_threshold_days
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    // ===================
    // Selection-change events
    // ===================

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Clamped to the recommended slider bounds
    pub fn set_churn_threshold(&mut self, days: u32) {
        self.churn_threshold_days = days.clamp(CHURN_THRESHOLD_MIN, CHURN_THRESHOLD_MAX);
    }

    pub fn set_active_view(&mut self, view: View) {
        self.active_view = view;
    }

    /// One full pipeline run (Filter → Aggregate → Adapt) for the active
    /// view. Recency is never recomputed here; it was fixed at load.
    pub fn frame(&self) -> ViewFrame {
        let filtered = filter::apply(
            &self.dataset.orders,
            &self.dataset.segments,
            &self.selection,
        );
        render(self.active_view, &filtered, self.churn_threshold_days)
    }

    /// Summary metrics for the current selection, independent of the
    /// active view
    pub fn metrics(&self) -> crate::metrics::Metrics {
        let filtered = filter::apply(
            &self.dataset.orders,
            &self.dataset.segments,
            &self.selection,
        );
        crate::metrics::summarize(&filtered.orders, self.churn_threshold_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let mut orders = File::create(dir.path().join("orders.csv")).unwrap();
        writeln!(
            orders,
            "order_id,customer_unique_id,product_category,product_category_name,order_purchase_timestamp,payment_value"
        )
        .unwrap();
        writeln!(
            orders,
            "o1,cust-a,electronics,audio_speakers,2024-01-01 10:00:00,100.0"
        )
        .unwrap();
        writeln!(
            orders,
            "o2,cust-b,electronics,audio_speakers,2024-03-01 10:00:00,60.0"
        )
        .unwrap();

        let mut segments = File::create(dir.path().join("customer-segmentation.csv")).unwrap();
        writeln!(segments, "customer_unique_id,segment,frequency,total_spending").unwrap();
        writeln!(segments, "cust-a,Loyal Customers,1,100.0").unwrap();
        writeln!(segments, "cust-b,Lost Customers,1,60.0").unwrap();

        let mut clv = File::create(dir.path().join("customer-lifetime-value.csv")).unwrap();
        writeln!(clv, "customer_unique_id,predicted_value").unwrap();

        dir
    }

    #[test]
    fn test_snapshot_is_memoized() {
        let dir = fixture_dir();
        let config = SourceConfig::from_dir(dir.path());

        let first = snapshot(&config).unwrap();
        let second = snapshot(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // the snapshot outlives its backing files: later calls never
        // touch storage again
        drop(dir);
        let third = snapshot(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_default_selection_spans_dataset() {
        let dir = fixture_dir();
        let dataset = Arc::new(
            DatasetLoader::new(SourceConfig::from_dir(dir.path()))
                .load()
                .unwrap(),
        );

        let selection = default_selection(&dataset);
        assert_eq!(selection.date_from.to_string(), "2024-01-01");
        assert_eq!(selection.date_to.to_string(), "2024-03-01");
        assert!(selection.categories.contains("electronics"));
        assert!(selection.segments.contains(&Segment::LoyalCustomers));
    }

    #[test]
    fn test_session_state_reruns_pipeline_on_change() {
        let dir = fixture_dir();
        let dataset = Arc::new(
            DatasetLoader::new(SourceConfig::from_dir(dir.path()))
                .load()
                .unwrap(),
        );
        let mut state = SessionState::with_defaults(Arc::clone(&dataset));

        assert_eq!(state.frame().metrics().total_orders, 2);

        // narrowing the date range drops the later order
        let mut narrowed = state.selection().clone();
        narrowed.date_to = narrowed.date_from;
        state.set_selection(narrowed);
        assert_eq!(state.frame().metrics().total_orders, 1);

        // the shared tables are untouched by session-local changes
        assert_eq!(dataset.orders.len(), 2);
    }

    #[test]
    fn test_churn_threshold_clamped_to_slider_bounds() {
        let dir = fixture_dir();
        let dataset = Arc::new(
            DatasetLoader::new(SourceConfig::from_dir(dir.path()))
                .load()
                .unwrap(),
        );
        let mut state = SessionState::with_defaults(dataset);

        state.set_churn_threshold(5);
        assert_eq!(state.churn_threshold_days(), CHURN_THRESHOLD_MIN);
        state.set_churn_threshold(4000);
        assert_eq!(state.churn_threshold_days(), CHURN_THRESHOLD_MAX);
        state.set_churn_threshold(90);
        assert_eq!(state.churn_threshold_days(), 90);
    }

    #[test]
    fn test_active_view_switch() {
        let dir = fixture_dir();
        let dataset = Arc::new(
            DatasetLoader::new(SourceConfig::from_dir(dir.path()))
                .load()
                .unwrap(),
        );
        let mut state = SessionState::with_defaults(dataset);

        state.set_active_view(View::EconomicTrends);
        assert!(matches!(
            state.frame(),
            crate::view::ViewFrame::EconomicTrends { .. }
        ));
    }
}
