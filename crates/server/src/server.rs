//! Router construction and server entry points.
//!
//! The engine sits behind one `RwLock`: read handlers take the read lock,
//! and every mutating handler holds the write lock for its whole
//! check-then-commit sequence. That lock is what keeps a production run's
//! feasibility check and debits from interleaving with any other stock
//! mutation.

use axum::{
    Router,
    routing::{delete, get, post},
};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{activity, exports, ingredients, production, recipes, statistics};
use engine::Engine;

pub type SharedState = Arc<RwLock<Engine>>;

pub fn router(engine: Engine) -> Router {
    let state: SharedState = Arc::new(RwLock::new(engine));

    Router::new()
        .route("/ingredients", get(ingredients::list).post(ingredients::add))
        .route("/ingredients/adjust", post(ingredients::adjust))
        .route("/ingredients/{name}", delete(ingredients::remove))
        .route("/recipes", get(recipes::book))
        .route("/recipes/line", post(recipes::set_line))
        .route("/recipes/{product}", get(recipes::lines))
        .route("/recipes/{product}/clear", post(recipes::clear))
        .route(
            "/recipes/{product}/lines/{ingredient}",
            delete(recipes::remove_line),
        )
        .route("/feasibility", get(production::feasibility))
        .route("/produce", post(production::produce))
        .route("/sell", post(production::sell))
        .route("/activity", get(activity::list).delete(activity::clear))
        .route("/reset", post(activity::reset))
        .route("/stats", get(statistics::get_stats))
        .route("/export/ingredients", get(exports::ingredients_csv))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
