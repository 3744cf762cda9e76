//! Tabular data sources for the dashboard
//!
//! Reads the three backing tables (orders, customer segments, lifetime
//! value) from CSV and produces the immutable, recency-enriched dataset
//! the pipeline runs over. A missing or malformed file fails the whole
//! load; there is no partial dataset.

use crate::enrich;
use crate::error::CoreError;
use crate::models::{ClvTable, CustomerSegment, Order};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Paths to the three backing tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub orders_path: PathBuf,
    pub segments_path: PathBuf,
    pub clv_path: PathBuf,
}

impl SourceConfig {
    /// Conventional file names under a single data directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            orders_path: dir.join("orders.csv"),
            segments_path: dir.join("customer-segmentation.csv"),
            clv_path: dir.join("customer-lifetime-value.csv"),
        }
    }
}

/// The loaded snapshot, immutable for the lifetime of the process.
///
/// Filtering borrows from these tables and never mutates them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub segments: Vec<CustomerSegment>,
    pub clv: ClvTable,
    /// Latest purchase timestamp over the unfiltered orders table; the
    /// fixed reference point for every recency value.
    pub latest_purchase: Option<NaiveDateTime>,
}

impl Dataset {
    /// First and last purchase dates in the orders table
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.orders.iter().map(|o| o.purchased_at.date()).min()?;
        let last = self.orders.iter().map(|o| o.purchased_at.date()).max()?;
        Some((first, last))
    }
}

/// Raw order row as it appears in the orders table
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    customer_unique_id: String,
    product_category: String,
    product_category_name: String,
    order_purchase_timestamp: String,
    payment_value: f64,
}

/// Loader for the three backing tables
pub struct DatasetLoader {
    config: SourceConfig,
}

impl DatasetLoader {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Read and validate all three tables, then enrich recency.
    ///
    /// Every `Dataset` this returns is already enriched: each order row
    /// carries its customer's recency.
    pub fn load(&self) -> Result<Dataset, CoreError> {
        let mut orders = self.load_orders()?;
        let segments = self.load_segments()?;
        let clv = self.load_clv()?;

        let latest_purchase = enrich::enrich_recency(&mut orders);

        info!(
            orders = orders.len(),
            segments = segments.len(),
            clv_rows = clv.len(),
            "Dataset loaded"
        );

        Ok(Dataset {
            orders,
            segments,
            clv,
            latest_purchase,
        })
    }

    fn load_orders(&self) -> Result<Vec<Order>, CoreError> {
        let path = &self.config.orders_path;
        let mut reader = open_csv(path)?;

        let mut orders = Vec::new();
        for (idx, row) in reader.deserialize::<OrderRow>().enumerate() {
            let row = row.map_err(|e| table_parse(path, e))?;

            let purchased_at = parse_timestamp(&row.order_purchase_timestamp).ok_or_else(|| {
                CoreError::SchemaMismatch {
                    path: path.clone(),
                    row: idx + 1,
                    message: format!(
                        "unparseable timestamp '{}'",
                        row.order_purchase_timestamp
                    ),
                }
            })?;

            if row.payment_value < 0.0 {
                return Err(CoreError::SchemaMismatch {
                    path: path.clone(),
                    row: idx + 1,
                    message: format!("negative payment_value {}", row.payment_value),
                });
            }

            orders.push(Order {
                order_id: row.order_id,
                customer_id: row.customer_unique_id,
                product_category: row.product_category,
                product_category_name: row.product_category_name,
                purchased_at,
                payment_value: row.payment_value,
                recency_days: 0,
            });
        }

        debug!(count = orders.len(), path = %path.display(), "Orders table read");
        Ok(orders)
    }

    fn load_segments(&self) -> Result<Vec<CustomerSegment>, CoreError> {
        let path = &self.config.segments_path;
        let mut reader = open_csv(path)?;

        let mut segments = Vec::new();
        for (idx, row) in reader.deserialize::<CustomerSegment>().enumerate() {
            let row = row.map_err(|e| table_parse(path, e))?;

            if row.total_spending < 0.0 {
                return Err(CoreError::SchemaMismatch {
                    path: path.clone(),
                    row: idx + 1,
                    message: format!("negative total_spending {}", row.total_spending),
                });
            }

            segments.push(row);
        }

        debug!(count = segments.len(), path = %path.display(), "Segments table read");
        Ok(segments)
    }

    /// Generic read: this table passes through untouched by current views
    fn load_clv(&self) -> Result<ClvTable, CoreError> {
        let path = &self.config.clv_path;
        let mut reader = open_csv(path)?;

        let headers = reader
            .headers()
            .map_err(|e| table_parse(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| table_parse(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(count = rows.len(), path = %path.display(), "CLV table read");
        Ok(ClvTable { headers, rows })
    }
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, CoreError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file))
}

fn table_parse(path: &Path, source: csv::Error) -> CoreError {
    CoreError::TableParse {
        path: path.to_path_buf(),
        message: source.to_string(),
        source,
    }
}

/// Timestamps are timezone-naive; both space- and T-separated layouts occur
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}
