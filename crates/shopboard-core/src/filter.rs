//! Selection predicates over the loaded snapshot
//!
//! Filtering is pure: it borrows rows from the immutable dataset and
//! never mutates it. The orders view and the segments view are
//! independent projections of the same selection; the customer join is
//! never materialized.

use crate::error::CoreError;
use crate::models::{CustomerSegment, Order, Segment};
use chrono::NaiveDate;
use std::collections::HashSet;

/// User-selected predicates, one per dashboard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Inclusive lower bound on the purchase date
    pub date_from: NaiveDate,
    /// Inclusive upper bound on the purchase date
    pub date_to: NaiveDate,
    /// Coarse product categories to keep. Empty selects no orders, not all.
    pub categories: HashSet<String>,
    pub segments: HashSet<Segment>,
}

impl Selection {
    pub fn new(
        date_from: NaiveDate,
        date_to: NaiveDate,
        categories: HashSet<String>,
        segments: HashSet<Segment>,
    ) -> Self {
        Self {
            date_from,
            date_to,
            categories,
            segments,
        }
    }

    /// Build a selection from raw UI inputs.
    ///
    /// The date strings (`%Y-%m-%d`) are the only inputs that can be
    /// malformed; segment labels outside the closed set simply select
    /// nothing, like any other non-matching predicate.
    pub fn parse(
        date_from: &str,
        date_to: &str,
        categories: &[String],
        segments: &[String],
    ) -> Result<Self, CoreError> {
        Ok(Self {
            date_from: parse_date(date_from)?,
            date_to: parse_date(date_to)?,
            categories: categories.iter().cloned().collect(),
            segments: segments
                .iter()
                .filter_map(|label| Segment::from_label(label))
                .collect(),
        })
    }

    /// Degenerate but valid: an inverted range selects no orders
    pub fn is_empty_range(&self) -> bool {
        self.date_from > self.date_to
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| CoreError::InvalidSelection {
        message: format!("malformed date '{}': {}", raw, e),
    })
}

/// Borrowed views over the snapshot produced by one selection
#[derive(Debug, Default)]
pub struct FilteredView<'a> {
    pub orders: Vec<&'a Order>,
    pub segments: Vec<&'a CustomerSegment>,
}

/// Apply a selection to the loaded tables.
///
/// Order rows survive when their purchase date falls inside the inclusive
/// date range AND their coarse category is selected; segment rows survive
/// when their segment is selected. Empty category set and inverted date
/// range both yield an empty orders view without error.
pub fn apply<'a>(
    orders: &'a [Order],
    segments: &'a [CustomerSegment],
    selection: &Selection,
) -> FilteredView<'a> {
    let orders_view = if selection.categories.is_empty() || selection.is_empty_range() {
        Vec::new()
    } else {
        orders
            .iter()
            .filter(|o| {
                let day = o.purchased_at.date();
                day >= selection.date_from
                    && day <= selection.date_to
                    && selection.categories.contains(&o.product_category)
            })
            .collect()
    };

    let segments_view = segments
        .iter()
        .filter(|s| selection.segments.contains(&s.segment))
        .collect();

    FilteredView {
        orders: orders_view,
        segments: segments_view,
    }
}
