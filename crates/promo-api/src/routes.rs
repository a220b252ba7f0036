//! # Routes
//!
//! Axum router configuration for the coupon API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check (also served at /)
/// - POST /api/v1/coupons - Register a coupon
/// - GET  /api/v1/coupons - List all coupons, in registration order
/// - GET  /api/v1/coupons/{code} - Get a coupon by code
/// - POST /api/v1/best-coupon - Evaluate the best coupon for a user and cart
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Coupon catalog
        .route(
            "/coupons",
            post(handlers::create_coupon).get(handlers::list_coupons),
        )
        .route("/coupons/{code}", get(handlers::get_coupon))
        // Evaluation
        .route("/best-coupon", post(handlers::best_coupon));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use chrono::{Days, Local, NaiveDate};
    use promo_core::{Coupon, Eligibility};
    use promo_store::{MemoryCatalog, MemoryLedger};
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// A window that contains today, so evaluation tests are not
    /// calendar-sensitive.
    fn open_window() -> (NaiveDate, NaiveDate) {
        let today = Local::now().date_naive();
        (
            today.checked_sub_days(Days::new(7)).unwrap(),
            today.checked_add_days(Days::new(7)).unwrap(),
        )
    }

    fn test_server(ledger: Arc<MemoryLedger>) -> TestServer {
        let state = AppState::with_stores(Arc::new(MemoryCatalog::new()), ledger);
        TestServer::new(create_router(state)).unwrap()
    }

    async fn register(server: &TestServer, coupon: &Coupon) {
        let response = server.post("/api/v1/coupons").json(coupon).await;
        assert_eq!(response.status_code(), 201);
    }

    fn evaluation_body(cart_items: Value) -> Value {
        json!({
            "user": { "user_id": "u1" },
            "cart": { "items": cart_items }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(Arc::new(MemoryLedger::new()));

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "promo-engine");
    }

    #[tokio::test]
    async fn test_create_list_and_get() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        register(&server, &Coupon::flat("TEN", 10.0, start, end)).await;
        register(&server, &Coupon::flat("FIVE", 5.0, start, end)).await;

        let body: Value = server.get("/api/v1/coupons").await.json();
        assert_eq!(body["count"], 2);
        assert_eq!(body["coupons"][0]["code"], "TEN");
        assert_eq!(body["coupons"][1]["code"], "FIVE");

        let response = server.get("/api/v1/coupons/FIVE").await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Value>()["code"], "FIVE");
    }

    #[tokio::test]
    async fn test_get_missing_coupon_is_404() {
        let server = test_server(Arc::new(MemoryLedger::new()));

        let response = server.get("/api/v1/coupons/NOPE").await;
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_409() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();
        let coupon = Coupon::flat("TEN", 10.0, start, end);

        register(&server, &coupon).await;

        let response = server.post("/api/v1/coupons").json(&coupon).await;
        assert_eq!(response.status_code(), 409);

        // Catalog unchanged by the rejected insert
        let body: Value = server.get("/api/v1/coupons").await.json();
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_blank_code_is_400() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        let response = server
            .post("/api/v1/coupons")
            .json(&Coupon::flat("   ", 10.0, start, end))
            .await;
        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn test_empty_catalog_evaluates_to_no_coupon() {
        let server = test_server(Arc::new(MemoryLedger::new()));

        let response = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 50.0, "quantity": 1 }
            ])))
            .await;
        assert_eq!(response.status_code(), 200);

        let body: Value = response.json();
        assert!(body["coupon"].is_null());
        assert!(body.get("discount").is_none());
        assert!(body.get("final_price").is_none());
    }

    #[tokio::test]
    async fn test_flat_coupon_applied() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        register(&server, &Coupon::flat("TEN", 10.0, start, end)).await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 50.0, "quantity": 1 }
            ])))
            .await
            .json();

        assert_eq!(body["coupon"], "TEN");
        assert_eq!(body["discount"], 10.0);
        assert_eq!(body["final_price"], 40.0);
    }

    #[tokio::test]
    async fn test_percent_coupon_capped() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        register(
            &server,
            &Coupon::percent("P20", 20.0, start, end).with_max_discount(15.0),
        )
        .await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 100.0, "quantity": 1 }
            ])))
            .await
            .json();

        // Raw 20% of 100 = 20, capped to 15
        assert_eq!(body["coupon"], "P20");
        assert_eq!(body["discount"], 15.0);
        assert_eq!(body["final_price"], 85.0);
    }

    #[tokio::test]
    async fn test_exhausted_coupon_excluded() {
        let ledger = Arc::new(MemoryLedger::new());
        let server = test_server(ledger.clone());
        let (start, end) = open_window();

        register(
            &server,
            &Coupon::flat("BIG", 40.0, start, end).with_usage_limit(1),
        )
        .await;
        register(&server, &Coupon::flat("SMALL", 5.0, start, end)).await;

        ledger.record_redemption("BIG", "u1").await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 100.0, "quantity": 1 }
            ])))
            .await
            .json();

        // BIG pays more but u1 has used it up
        assert_eq!(body["coupon"], "SMALL");
        assert_eq!(body["discount"], 5.0);
    }

    #[tokio::test]
    async fn test_excluded_category_cart_gets_no_coupon() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        register(
            &server,
            &Coupon::flat("TEN", 10.0, start, end).with_eligibility(
                Eligibility::new().with_excluded_categories(vec!["alcohol".into()]),
            ),
        )
        .await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "category": "alcohol", "unit_price": 30.0, "quantity": 2 }
            ])))
            .await
            .json();

        assert!(body["coupon"].is_null());
    }

    #[tokio::test]
    async fn test_expired_coupon_not_applied() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let today = Local::now().date_naive();
        let start = today.checked_sub_days(Days::new(30)).unwrap();
        let end = today.checked_sub_days(Days::new(1)).unwrap();

        register(&server, &Coupon::flat("OLD", 10.0, start, end)).await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 50.0, "quantity": 1 }
            ])))
            .await
            .json();

        assert!(body["coupon"].is_null());
    }

    #[tokio::test]
    async fn test_best_of_several_coupons_wins() {
        let server = test_server(Arc::new(MemoryLedger::new()));
        let (start, end) = open_window();

        register(&server, &Coupon::flat("FIVE", 5.0, start, end)).await;
        register(&server, &Coupon::percent("P30", 30.0, start, end)).await;
        register(&server, &Coupon::flat("TEN", 10.0, start, end)).await;

        let body: Value = server
            .post("/api/v1/best-coupon")
            .json(&evaluation_body(json!([
                { "product_id": "p1", "unit_price": 100.0, "quantity": 1 }
            ])))
            .await
            .json();

        // 30% of 100 = 30 beats both flat coupons
        assert_eq!(body["coupon"], "P30");
        assert_eq!(body["discount"], 30.0);
        assert_eq!(body["final_price"], 70.0);
    }
}
