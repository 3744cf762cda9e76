//! Data models for shopboard

pub mod customer;
pub mod order;

pub use customer::{ClvTable, CustomerSegment, Segment};
pub use order::{ChurnRisk, Order};
