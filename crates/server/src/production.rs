//! Production and sale API endpoints

use api_types::activity::TransactionCreated;
use api_types::production::{FeasibilityQuery, ProductionRun};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::Feasibility;

use crate::{ServerError, server::SharedState};

/// User-entered unit counts arrive as arbitrary numbers and are floored,
/// then clamped to at least one whole unit, before they reach the engine.
fn coerce_units(units: f64) -> u32 {
    units.floor().max(1.0) as u32
}

pub async fn feasibility(
    State(state): State<SharedState>,
    Query(query): Query<FeasibilityQuery>,
) -> Json<Feasibility> {
    let engine = state.read().await;
    Json(engine.check_feasibility(&query.product, coerce_units(query.units)))
}

pub async fn produce(
    State(state): State<SharedState>,
    Json(payload): Json<ProductionRun>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut engine = state.write().await;
    let id = engine.produce(&payload.product, coerce_units(payload.units))?;
    Ok(Json(TransactionCreated { id }))
}

pub async fn sell(
    State(state): State<SharedState>,
    Json(payload): Json<ProductionRun>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut engine = state.write().await;
    let id = engine.sell(&payload.product, coerce_units(payload.units))?;
    Ok(Json(TransactionCreated { id }))
}
