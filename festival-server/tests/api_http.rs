//! HTTP 层测试
//!
//! Drives the assembled router with in-process requests: status codes, the
//! `{"error": ...}` envelope, bearer-token auth and role gating.

mod common;

use axum::Router;
use axum::body::Body;
use common::{seed_product, seed_tent, test_db};
use festival_server::api;
use festival_server::auth::jwt;
use festival_server::db::DbService;
use festival_server::state::AppState;
use festival_server::util::{hash_password, now_millis};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use shared::models::{Role, User};
use tempfile::TempDir;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-not-for-production";

async fn test_app() -> (TempDir, DbService, Router) {
    let (dir, db) = test_db().await;
    let state = AppState {
        db: db.clone(),
        jwt_secret: TEST_SECRET.to_string(),
    };
    (dir, db, api::create_router(state))
}

/// Insert a user with a real password hash and mint a token for them.
async fn seed_login(db: &DbService, username: &str, password: &str, role: Role) -> (i64, String) {
    let hash = hash_password(password).expect("hash");
    let id = festival_server::db::users::insert(
        &db.write,
        username,
        &format!("{username}@festival.com"),
        &hash,
        role,
    )
    .await
    .expect("seed user");
    let user = User {
        id,
        username: username.to_string(),
        email: format!("{username}@festival.com"),
        password_hash: hash,
        role,
        created_at: now_millis(),
    };
    let token = jwt::create_token(&user, TEST_SECRET).expect("token");
    (id, token)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_answers() {
    let (_dir, _db, app) = test_app().await;
    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn login_issues_token_and_rejects_bad_credentials() {
    let (_dir, db, app) = test_app().await;
    seed_login(&db, "admin", "admin123", Role::Admin).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"username": "admin", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({"username": "admin", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn order_placement_round_trip_and_error_envelope() {
    let (_dir, db, app) = test_app().await;
    seed_tent(&db, "A-01").await;
    let product_id = seed_product(&db, "Neko-Active", 50_000, 10).await;

    // Success: 201 with total and payment reference
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            serde_json::json!({
                "tent_number": "A-01",
                "items": [{"product_id": product_id, "quantity": 3}],
                "payment_method": "card",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["total_amount"], serde_json::json!(1500.0));
    assert_eq!(body["status"], "new");
    let order_id = body["id"].as_i64().expect("order id");
    assert_eq!(
        body["payment_url"],
        serde_json::json!(format!("/api/payment/{order_id}"))
    );

    // Stock violation: aggregated 400, newline-joined, nothing persisted
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            serde_json::json!({
                "tent_number": "A-01",
                "items": [
                    {"product_id": product_id, "quantity": 50},
                    {"product_id": 777, "quantity": 1},
                ],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error message");
    assert_eq!(message.lines().count(), 2);

    // Unknown tent: 404 with the envelope
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            serde_json::json!({
                "tent_number": "Z-99",
                "items": [{"product_id": product_id, "quantity": 1}],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Tent not found or inactive");
}

#[tokio::test]
async fn role_gating_on_inventory_review() {
    let (_dir, db, app) = test_app().await;
    let (_id, courier_token) = seed_login(&db, "courier1", "pw", Role::Courier).await;
    let (_id, operator_token) = seed_login(&db, "operator1", "pw", Role::Operator).await;

    // Anonymous: 401
    let response = app
        .clone()
        .oneshot(get("/api/inventory-requests"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Courier: 403 with the envelope
    let response = app
        .clone()
        .oneshot(get_authed("/api/inventory-requests", &courier_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Insufficient permissions");

    // Operator: 200
    let response = app
        .oneshot(get_authed("/api/inventory-requests", &operator_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn courier_claims_order_by_setting_in_delivery() {
    let (_dir, db, app) = test_app().await;
    seed_tent(&db, "A-01").await;
    let product_id = seed_product(&db, "Neko-Active", 50_000, 10).await;
    let (courier_id, courier_token) = seed_login(&db, "courier1", "pw", Role::Courier).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            serde_json::json!({
                "tent_number": "A-01",
                "items": [{"product_id": product_id, "quantity": 1}],
            }),
        ))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"].as_i64().unwrap();

    // Courier may not mark delivered straight away
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/orders/{order_id}/status"),
            Some(&courier_token),
            serde_json::json!({"status": "delivered"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // in_delivery claims the order
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/orders/{order_id}/status"),
            Some(&courier_token),
            serde_json::json!({"status": "in_delivery"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "in_delivery");
    assert_eq!(body["courier_id"], serde_json::json!(courier_id));

    // Unknown order: 404
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/orders/424242/status",
            Some(&courier_token),
            serde_json::json!({"status": "in_delivery"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_listing_widens_for_staff() {
    let (_dir, db, app) = test_app().await;
    seed_product(&db, "Visible", 10_000, 5).await;
    let hidden = seed_product(&db, "Hidden", 10_000, 5).await;
    sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?")
        .bind(hidden)
        .execute(&db.write)
        .await
        .unwrap();
    seed_product(&db, "SoldOut", 10_000, 0).await;

    let (_id, operator_token) = seed_login(&db, "operator1", "pw", Role::Operator).await;

    let response = app.clone().oneshot(get("/api/products")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1, "public sees orderable only");

    let response = app
        .oneshot(get_authed("/api/products", &operator_token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3, "staff see everything");
}

#[tokio::test]
async fn payment_stub_marks_order_paid() {
    let (_dir, db, app) = test_app().await;
    seed_tent(&db, "A-01").await;
    let product_id = seed_product(&db, "Neko-Active", 50_000, 10).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            None,
            serde_json::json!({
                "tent_number": "A-01",
                "items": [{"product_id": product_id, "quantity": 1}],
            }),
        ))
        .await
        .unwrap();
    let order_id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/payment/{order_id}/success")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (payment_status,): (String,) =
        sqlx::query_as("SELECT payment_status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&db.read)
            .await
            .unwrap();
    assert_eq!(payment_status, "paid");
}
