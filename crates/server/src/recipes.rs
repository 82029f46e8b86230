//! Recipe book API endpoints

use std::collections::BTreeMap;

use api_types::recipe::RecipeLineSet;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::RecipeBook;

use crate::{ServerError, server::SharedState};

pub async fn book(State(state): State<SharedState>) -> Json<RecipeBook> {
    let engine = state.read().await;
    Json(engine.recipes().clone())
}

pub async fn lines(
    State(state): State<SharedState>,
    Path(product): Path<String>,
) -> Json<BTreeMap<String, f64>> {
    let engine = state.read().await;
    Json(engine.recipe_lines(&product))
}

pub async fn set_line(
    State(state): State<SharedState>,
    Json(payload): Json<RecipeLineSet>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.write().await;
    engine.set_recipe_line(&payload.product, &payload.ingredient, payload.quantity)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_line(
    State(state): State<SharedState>,
    Path((product, ingredient)): Path<(String, String)>,
) -> StatusCode {
    let mut engine = state.write().await;
    engine.remove_recipe_line(&product, &ingredient);
    StatusCode::NO_CONTENT
}

pub async fn clear(State(state): State<SharedState>, Path(product): Path<String>) -> StatusCode {
    let mut engine = state.write().await;
    engine.clear_recipe(&product);
    StatusCode::NO_CONTENT
}
