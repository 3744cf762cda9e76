//! Terminal output for shopboard
//!
//! Renders the metrics block and per-category revenue table, or dumps a
//! chart-ready frame as JSON for a rendering collaborator.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use shopboard_core::charts;
use shopboard_core::store::SessionState;

/// Print the summary metrics block for the current selection
pub fn print_summary(state: &SessionState) {
    let metrics = state.metrics();
    let selection = state.selection();

    let mut categories: Vec<&str> = selection.categories.iter().map(String::as_str).collect();
    categories.sort_unstable();
    let mut segments: Vec<&str> = selection.segments.iter().map(|s| s.label()).collect();
    segments.sort_unstable();

    println!("shopboard - Sales & Customer Metrics");
    println!("====================================");
    println!();
    println!(
        "Date range:       {} to {}",
        selection.date_from, selection.date_to
    );
    println!("Categories:       {}", categories.join(", "));
    println!("Segments:         {}", segments.join(", "));
    println!();
    println!("Customers:        {}", metrics.total_customers);
    println!("Orders:           {}", metrics.total_orders);
    println!("Total Revenue:    ${:.2}", metrics.total_revenue);
    println!("Avg Order Value:  ${:.2}", metrics.avg_order_value);
    println!(
        "Churn Rate:       {:.2}% (threshold {} days)",
        metrics.churn_rate,
        state.churn_threshold_days()
    );
    match &metrics.top_category {
        Some(category) => println!("Top Category:     {}", category),
        None => println!("Top Category:     n/a (no orders in selection)"),
    }

    // same ordering the treemap renders with: largest revenue first
    if let Some(slices) = charts::treemap_series(&metrics.category_revenue).ready() {
        println!();
        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Category", "Revenue"]);
        for slice in slices {
            table.add_row(vec![
                slice.category.clone(),
                format!("${:.2}", slice.revenue),
            ]);
        }
        println!("{}", table);
    }
}

/// Emit the active view's frame as JSON
pub fn print_frame(state: &SessionState, pretty: bool) -> Result<()> {
    let frame = state.frame();
    let json = if pretty {
        serde_json::to_string_pretty(&frame)
    } else {
        serde_json::to_string(&frame)
    }
    .context("failed to serialize view frame")?;

    println!("{}", json);
    Ok(())
}
