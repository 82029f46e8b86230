//! Activity aggregation over a date window.
//!
//! Reads only the ledger. Ingredient and product names in entries are
//! non-owning references, so aggregation never fails on names that no longer
//! resolve.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::transactions::Transaction;

/// Most-sold products reported.
const TOP_PRODUCTS: usize = 2;
/// Most-consumed ingredients reported.
const TOP_INGREDIENTS: usize = 3;
/// Rendered when a top-list has no qualifying entries.
const PLACEHOLDER: &str = "—";

/// Aggregate activity over a closed `[from, to]` window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivityReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub units_produced: u64,
    pub units_sold: u64,
    /// Products by summed sold units, descending, capped at two. Ties keep
    /// first-encountered order.
    pub top_products: Vec<(String, u64)>,
    /// Ingredients by summed consumed amount, descending, capped at three.
    pub top_ingredients: Vec<(String, f64)>,
}

impl ActivityReport {
    /// `"Humita (8), Caprese (2)"`, or the placeholder when nothing sold.
    pub fn top_products_label(&self) -> String {
        if self.top_products.is_empty() {
            return PLACEHOLDER.to_string();
        }
        self.top_products
            .iter()
            .map(|(product, units)| format!("{product} ({units})"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"Harina: 500.0, Carne: 600.0"`, or the placeholder when nothing was
    /// consumed. Amounts carry one decimal place.
    pub fn top_ingredients_label(&self) -> String {
        if self.top_ingredients.is_empty() {
            return PLACEHOLDER.to_string();
        }
        self.top_ingredients
            .iter()
            .map(|(ingredient, amount)| format!("{ingredient}: {amount:.1}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// First instant of the month `now` falls in: the default lower bound for
/// reports.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(now)
}

pub(crate) fn aggregate(
    entries: &[Transaction],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> ActivityReport {
    let mut units_produced = 0u64;
    let mut units_sold = 0u64;
    let mut sold: Vec<(String, u64)> = Vec::new();
    let mut consumed_totals: Vec<(String, f64)> = Vec::new();

    let window = entries.iter().filter(|entry| {
        let at = entry.occurred_at();
        from <= at && at <= to
    });

    for entry in window {
        match entry {
            Transaction::Adjustment { .. } => {}
            Transaction::Production {
                units, consumed, ..
            } => {
                units_produced += u64::from(*units);
                for (ingredient, amount) in consumed {
                    match consumed_totals
                        .iter_mut()
                        .find(|(name, _)| name == ingredient)
                    {
                        Some((_, total)) => *total += amount,
                        None => consumed_totals.push((ingredient.clone(), *amount)),
                    }
                }
            }
            Transaction::Sale { product, units, .. } => {
                units_sold += u64::from(*units);
                match sold.iter_mut().find(|(name, _)| name == product) {
                    Some((_, total)) => *total += u64::from(*units),
                    None => sold.push((product.clone(), u64::from(*units))),
                }
            }
        }
    }

    // Stable sorts over first-appearance accumulation: ties keep the order
    // the names first showed up in the window.
    sold.sort_by(|a, b| b.1.cmp(&a.1));
    sold.truncate(TOP_PRODUCTS);
    consumed_totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    consumed_totals.truncate(TOP_INGREDIENTS);

    ActivityReport {
        from,
        to,
        units_produced,
        units_sold,
        top_products: sold,
        top_ingredients: consumed_totals,
    }
}
