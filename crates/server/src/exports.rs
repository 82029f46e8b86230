//! Ingredient listing export.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use csv::Writer;
use serde::Serialize;

use crate::server::SharedState;

#[derive(Serialize)]
struct ExportRow<'a> {
    ingredient: &'a str,
    unit: &'a str,
    /// Full precision; display rounding is the consumer's concern.
    quantity: f64,
}

pub async fn ingredients_csv(State(state): State<SharedState>) -> Response {
    let engine = state.read().await;

    let mut writer = Writer::from_writer(vec![]);
    for ingredient in engine.ingredients() {
        if let Err(err) = writer.serialize(ExportRow {
            ingredient: &ingredient.name,
            unit: ingredient.unit.as_str(),
            quantity: ingredient.quantity,
        }) {
            tracing::error!("failed to serialize export row: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    match writer.into_inner() {
        Ok(data) => (
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            data,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("failed to finalize export: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
