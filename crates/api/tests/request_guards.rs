//! Integration tests for actor guards and request validation.
//!
//! Every request here is rejected before the first database query, so
//! the suite runs against the full middleware stack without a database.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, get, request_as};
use serde_json::json;

#[tokio::test]
async fn missing_actor_headers_returns_401() {
    let app = build_test_app();
    let response = get(app, "/api/v1/cart").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn non_numeric_user_id_header_returns_401() {
    let app = build_test_app();
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/cart")
        .header("x-user-id", "not-a-number")
        .header("x-user-role", "customer")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customer_cannot_list_all_bookings() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::GET,
        "/api/v1/bookings/admin/all",
        1,
        "customer",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Admin role required");
}

#[tokio::test]
async fn customer_cannot_list_all_loans() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::GET,
        "/api/v1/loans",
        1,
        "customer",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn customer_cannot_process_returns() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/returns",
        1,
        "customer",
        Some(json!({ "booking_item_id": 1, "condition": "GOOD" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn zero_quantity_cart_line_returns_400() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/cart",
        1,
        "customer",
        Some(json!({
            "kind": "ASSET",
            "product_id": 10,
            "quantity": 0,
            "unit_price": "50000"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn negative_unit_price_returns_400() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/cart",
        1,
        "customer",
        Some(json!({
            "kind": "ASSET",
            "product_id": 10,
            "quantity": 1,
            "unit_price": "-100"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_with_inverted_date_range_returns_400() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/bookings/checkout",
        1,
        "customer",
        Some(json!({
            "start_date": "2025-02-10",
            "end_date": "2025-02-01"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn reject_without_reason_returns_400() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::PATCH,
        "/api/v1/bookings/1/reject",
        1,
        "admin",
        Some(json!({ "reason": "   " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Rejection requires a reason");
}

#[tokio::test]
async fn out_of_range_rating_returns_400() {
    let app = build_test_app();
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/feedbacks",
        1,
        "customer",
        Some(json!({ "booking_id": 1, "rating": 9 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app();
    let response = get(app, "/api/v1/cart").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID");
}
