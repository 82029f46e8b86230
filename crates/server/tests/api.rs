use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    server::router(engine::Engine::builder().build())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn ingredients_are_listed_in_name_order() {
    let app = app();
    let (status, body) = send(&app, get("/ingredients")).await;

    assert_eq!(status, StatusCode::OK);
    let list = as_json(&body);
    assert_eq!(list.as_array().unwrap().len(), 10);
    assert_eq!(list[0]["name"], "Aceitunas");
    assert_eq!(list[0]["unit"], "u");
    assert_eq!(list[4]["name"], "Harina");
    assert_eq!(list[4]["quantity"], 5000.0);
}

#[tokio::test]
async fn adding_an_existing_ingredient_conflicts() {
    let app = app();

    let (status, body) = send(
        &app,
        post("/ingredients", json!({"name": "Sal", "unit": "g", "quantity": 250.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(as_json(&body)["name"], "Sal");

    let (status, body) = send(
        &app,
        post("/ingredients", json!({"name": "Harina", "unit": "g", "quantity": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("Harina"));
}

#[tokio::test]
async fn rejected_adjustment_leaves_no_activity() {
    let app = app();

    let (status, _) = send(
        &app,
        post(
            "/ingredients/adjust",
            json!({"ingredient": "Queso", "kind": "waste", "amount": 5000.0, "sign": "-"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, get("/activity")).await;
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn production_debits_stock_and_logs_activity() {
    let app = app();

    let (status, body) = send(&app, post("/produce", json!({"product": "Carne", "units": 10.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(as_json(&body)["id"].is_string());

    let (_, body) = send(&app, get("/ingredients")).await;
    let list = as_json(&body);
    assert_eq!(list[4]["name"], "Harina");
    assert_eq!(list[4]["quantity"], 4500.0);

    let (_, body) = send(&app, get("/activity")).await;
    let activity = as_json(&body);
    assert_eq!(activity.as_array().unwrap().len(), 1);
    assert_eq!(activity[0]["type"], "production");
    assert_eq!(activity[0]["units"], 10);
    assert_eq!(activity[0]["consumed"]["Harina"], 500.0);
}

#[tokio::test]
async fn infeasible_production_is_unprocessable() {
    let app = app();

    let (status, body) = send(&app, post("/produce", json!({"product": "Carne", "units": 1000.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = as_json(&body)["error"].as_str().unwrap().to_string();
    assert!(message.contains("insufficient stock"));
    assert!(message.contains("Harina (50000 g)"));

    let (_, body) = send(&app, get("/activity")).await;
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn feasibility_reports_every_shortfall() {
    let app = app();

    let (status, body) = send(&app, get("/feasibility?product=Carne&units=1000")).await;
    assert_eq!(status, StatusCode::OK);
    let check = as_json(&body);
    assert_eq!(check["ok"], false);
    assert_eq!(check["shortfalls"].as_array().unwrap().len(), 5);

    let (_, body) = send(&app, get("/feasibility?product=Carne&units=1")).await;
    assert_eq!(as_json(&body)["ok"], true);
}

#[tokio::test]
async fn sales_roll_up_into_stats() {
    let app = app();

    send(&app, post("/sell", json!({"product": "Humita", "units": 5.0}))).await;
    send(&app, post("/sell", json!({"product": "Humita", "units": 3.0}))).await;
    send(&app, post("/produce", json!({"product": "Humita", "units": 4.0}))).await;

    let (status, body) = send(&app, get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    let stats = as_json(&body);
    assert_eq!(stats["units_sold"], 8);
    assert_eq!(stats["units_produced"], 4);
    assert_eq!(stats["top_products"], "Humita (8)");
    assert_eq!(stats["top_ingredients"], "Choclo: 280.0, Harina: 200.0, Leche: 60.0");
}

#[tokio::test]
async fn empty_stats_render_placeholders() {
    let app = app();

    let (_, body) = send(&app, get("/stats")).await;
    let stats = as_json(&body);
    assert_eq!(stats["units_produced"], 0);
    assert_eq!(stats["top_products"], "—");
    assert_eq!(stats["top_ingredients"], "—");
}

#[tokio::test]
async fn deleting_an_ingredient_prunes_recipes() {
    let app = app();

    let (status, _) = send(&app, delete("/ingredients/Harina")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/recipes/Carne")).await;
    let lines = as_json(&body);
    assert!(lines.get("Harina").is_none());
    assert_eq!(lines["Carne"], 60.0);

    let (status, _) = send(&app, delete("/ingredients/Sal")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recipe_lines_can_be_edited_and_cleared() {
    let app = app();

    let (status, _) = send(
        &app,
        post("/recipes/line", json!({"product": "Caprese", "ingredient": "Leche", "quantity": 5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/recipes/Caprese")).await;
    assert_eq!(as_json(&body)["Leche"], 5.0);

    let (status, _) = send(&app, delete("/recipes/Caprese/lines/Leche")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, post("/recipes/Caprese/clear", json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/recipes/Caprese")).await;
    assert_eq!(as_json(&body), json!({}));

    let (status, body) = send(
        &app,
        post("/recipes/line", json!({"product": "Caprese", "ingredient": "Azafrán", "quantity": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("Azafrán"));
}

#[tokio::test]
async fn units_are_floored_and_clamped_at_the_edge() {
    let app = app();

    let (status, _) = send(&app, post("/produce", json!({"product": "Caprese", "units": 0.0}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/activity")).await;
    assert_eq!(as_json(&body)[0]["units"], 1);
}

#[tokio::test]
async fn activity_window_is_newest_first() {
    let app = app();

    send(&app, post("/sell", json!({"product": "Humita", "units": 1.0}))).await;
    send(&app, post("/sell", json!({"product": "Caprese", "units": 2.0}))).await;

    let (_, body) = send(&app, get("/activity?limit=1")).await;
    let activity = as_json(&body);
    assert_eq!(activity.as_array().unwrap().len(), 1);
    assert_eq!(activity[0]["product"], "Caprese");
}

#[tokio::test]
async fn reset_restores_seed_data() {
    let app = app();

    send(&app, post("/produce", json!({"product": "Carne", "units": 10.0}))).await;
    let (status, _) = send(&app, post("/reset", json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/ingredients")).await;
    assert_eq!(as_json(&body)[4]["quantity"], 5000.0);

    let (_, body) = send(&app, get("/activity")).await;
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn ledger_clear_is_separate_from_reset() {
    let app = app();

    send(&app, post("/produce", json!({"product": "Caprese", "units": 2.0}))).await;
    let (status, _) = send(&app, delete("/activity")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/activity")).await;
    assert_eq!(as_json(&body), json!([]));

    // Stock stays debited: only the history was dropped.
    let (_, body) = send(&app, get("/ingredients")).await;
    assert_eq!(as_json(&body)[4]["quantity"], 4900.0);
}

#[tokio::test]
async fn export_lists_ingredients_as_csv() {
    let app = app();

    let response = app.clone().oneshot(get("/export/ingredients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), "ingredient,unit,quantity");
    assert_eq!(lines.next().unwrap(), "Aceitunas,u,50.0");
    assert!(csv.contains("Harina,g,5000.0"));
}
