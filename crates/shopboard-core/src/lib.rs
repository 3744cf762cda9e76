//! shopboard-core - Core library for shopboard
//!
//! Loads the e-commerce tables (orders, customer segments, lifetime
//! value), enriches them with per-customer recency, and turns user
//! selections into summary metrics and chart-ready series for the three
//! dashboard views.

pub mod charts;
pub mod datasource;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod store;
pub mod trends;
pub mod view;

pub use datasource::{Dataset, DatasetLoader, SourceConfig};
pub use error::CoreError;
pub use filter::{FilteredView, Selection};
pub use metrics::Metrics;
pub use store::SessionState;
pub use view::{View, ViewFrame};
