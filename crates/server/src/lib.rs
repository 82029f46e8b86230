use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use serde::Serialize;

pub use server::{router, run, run_with_listener, spawn_with_listener};

mod activity;
mod exports;
mod ingredients;
mod production;
mod recipes;
mod server;
mod statistics;

pub mod types {
    pub mod ingredient {
        pub use api_types::ingredient::{AdjustmentKind, IngredientAdjust, IngredientNew, Sign};
        pub use engine::{Ingredient, Unit};
    }

    pub mod recipe {
        pub use api_types::recipe::RecipeLineSet;
        pub use engine::RecipeBook;
    }

    pub mod production {
        pub use api_types::production::{FeasibilityQuery, ProductionRun};
        pub use engine::{Feasibility, Shortfall};
    }

    pub mod activity {
        pub use api_types::activity::{ActivityList, TransactionCreated};
        pub use engine::Transaction;
    }

    pub mod stats {
        pub use api_types::stats::{ActivitySummary, StatsQuery};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::DuplicateName(_) => StatusCode::CONFLICT,
        EngineError::InvalidQuantity(_)
        | EngineError::NegativeStock(_)
        | EngineError::InsufficientStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
