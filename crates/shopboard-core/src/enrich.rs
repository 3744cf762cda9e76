//! Recency enrichment
//!
//! Recency is the number of whole days between a customer's latest
//! purchase and the latest purchase in the entire dataset. It is computed
//! once over the unfiltered orders table at load time; filter changes
//! never move the reference point, so recency values are stable across
//! the session.

use crate::models::Order;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

/// Compute per-customer recency and join it onto every order row.
///
/// Returns the global latest purchase timestamp, or `None` for an empty
/// table. Fractional days truncate; a dataset with a single timestamp
/// yields recency 0 for every customer.
pub fn enrich_recency(orders: &mut [Order]) -> Option<NaiveDateTime> {
    let global_max = orders.iter().map(|o| o.purchased_at).max()?;

    let mut last_purchase: HashMap<String, NaiveDateTime> = HashMap::new();
    for order in orders.iter() {
        last_purchase
            .entry(order.customer_id.clone())
            .and_modify(|ts| {
                if order.purchased_at > *ts {
                    *ts = order.purchased_at;
                }
            })
            .or_insert(order.purchased_at);
    }

    for order in orders.iter_mut() {
        if let Some(last) = last_purchase.get(&order.customer_id) {
            order.recency_days = (global_max - *last).num_days() as u32;
        }
    }

    debug!(
        customers = last_purchase.len(),
        latest = %global_max,
        "Recency enriched"
    );
    Some(global_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(customer_id: &str, date: &str) -> Order {
        let purchased_at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Order {
            order_id: format!("{}-{}", customer_id, date),
            customer_id: customer_id.to_string(),
            product_category: "electronics".to_string(),
            product_category_name: "audio_speakers".to_string(),
            purchased_at,
            payment_value: 10.0,
            recency_days: 0,
        }
    }

    #[test]
    fn test_empty_table() {
        let mut orders: Vec<Order> = Vec::new();
        assert_eq!(enrich_recency(&mut orders), None);
    }

    #[test]
    fn test_single_customer_single_order() {
        let mut orders = vec![order("cust-a", "2024-01-01")];
        enrich_recency(&mut orders);
        assert_eq!(orders[0].recency_days, 0);
    }

    #[test]
    fn test_latest_purchase_defines_recency_for_all_rows() {
        // same customer, two purchases: the newer one pins recency to 0
        // on both rows
        let mut orders = vec![order("cust-a", "2024-01-01"), order("cust-a", "2024-02-01")];
        let global_max = enrich_recency(&mut orders).unwrap();

        assert_eq!(global_max.date().to_string(), "2024-02-01");
        assert!(orders.iter().all(|o| o.recency_days == 0));
    }

    #[test]
    fn test_stale_customer_counts_days() {
        let mut orders = vec![
            order("cust-a", "2024-02-01"),
            order("cust-b", "2024-01-01"),
            order("cust-b", "2023-12-01"),
        ];
        enrich_recency(&mut orders);

        for o in &orders {
            match o.customer_id.as_str() {
                "cust-a" => assert_eq!(o.recency_days, 0),
                "cust-b" => assert_eq!(o.recency_days, 31),
                other => panic!("unexpected customer {}", other),
            }
        }
    }

    #[test]
    fn test_single_timestamp_dataset() {
        let mut orders = vec![
            order("cust-a", "2024-01-01"),
            order("cust-b", "2024-01-01"),
            order("cust-c", "2024-01-01"),
        ];
        enrich_recency(&mut orders);
        assert!(orders.iter().all(|o| o.recency_days == 0));
    }
}
