//! Statistics API endpoints

use api_types::stats::{ActivitySummary, StatsQuery};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use engine::month_start;

use crate::server::SharedState;

/// Aggregate activity over the requested window. Bounds default
/// independently: a missing `from` becomes the first day of the current
/// month, a missing `to` becomes now.
pub async fn get_stats(
    State(state): State<SharedState>,
    Query(query): Query<StatsQuery>,
) -> Json<ActivitySummary> {
    let now = Utc::now();
    let from = query
        .from
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| month_start(now));
    let to = query.to.map(|dt| dt.with_timezone(&Utc)).unwrap_or(now);

    let engine = state.read().await;
    let report = engine.report(from, to);

    Json(ActivitySummary {
        from: report.from,
        to: report.to,
        units_produced: report.units_produced,
        units_sold: report.units_sold,
        top_products: report.top_products_label(),
        top_ingredients: report.top_ingredients_label(),
    })
}
