//! Ingredient API endpoints

use api_types::activity::TransactionCreated;
use api_types::ingredient::{IngredientAdjust, IngredientNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Ingredient, Unit};

use crate::{ServerError, server::SharedState};

pub async fn list(State(state): State<SharedState>) -> Json<Vec<Ingredient>> {
    let engine = state.read().await;
    Json(engine.ingredients().cloned().collect())
}

pub async fn add(
    State(state): State<SharedState>,
    Json(payload): Json<IngredientNew>,
) -> Result<(StatusCode, Json<Ingredient>), ServerError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ServerError::Generic("ingredient name required".to_string()));
    }
    let unit = Unit::from(payload.unit);

    let mut engine = state.write().await;
    engine.add_ingredient(&name, unit.clone(), payload.quantity)?;

    Ok((
        StatusCode::CREATED,
        Json(Ingredient {
            name,
            unit,
            quantity: payload.quantity,
        }),
    ))
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.write().await;
    engine.remove_ingredient(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn adjust(
    State(state): State<SharedState>,
    Json(payload): Json<IngredientAdjust>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut engine = state.write().await;
    let id = engine.adjust_ingredient(
        &payload.ingredient,
        payload.amount,
        map_sign(payload.sign),
        map_kind(payload.kind),
        payload.note.as_deref().unwrap_or("").trim(),
    )?;

    Ok(Json(TransactionCreated { id }))
}

fn map_kind(kind: api_types::ingredient::AdjustmentKind) -> engine::AdjustmentKind {
    match kind {
        api_types::ingredient::AdjustmentKind::Purchase => engine::AdjustmentKind::Purchase,
        api_types::ingredient::AdjustmentKind::Adjust => engine::AdjustmentKind::Adjust,
        api_types::ingredient::AdjustmentKind::Waste => engine::AdjustmentKind::Waste,
    }
}

fn map_sign(sign: api_types::ingredient::Sign) -> engine::Sign {
    match sign {
        api_types::ingredient::Sign::Plus => engine::Sign::Plus,
        api_types::ingredient::Sign::Minus => engine::Sign::Minus,
    }
}
