//! Activity log endpoints: recent history, bulk clear and seed reset.

use api_types::activity::ActivityList;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use engine::Transaction;

use crate::server::SharedState;

/// Newest-first display cap: a window over the ledger, not a ledger rule.
const DEFAULT_LIMIT: usize = 20;

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<ActivityList>,
) -> Json<Vec<Transaction>> {
    let engine = state.read().await;
    let history = engine.history();

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let start = history.len().saturating_sub(limit);
    let mut window: Vec<Transaction> = history[start..].to_vec();
    window.reverse();

    Json(window)
}

pub async fn clear(State(state): State<SharedState>) -> StatusCode {
    let mut engine = state.write().await;
    engine.clear_ledger();
    StatusCode::NO_CONTENT
}

pub async fn reset(State(state): State<SharedState>) -> StatusCode {
    let mut engine = state.write().await;
    engine.reset();
    StatusCode::NO_CONTENT
}
