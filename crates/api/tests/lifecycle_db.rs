//! Database-backed lifecycle tests.
//!
//! These run against a real Postgres (provisioned per test by
//! `#[sqlx::test]`) and cover the invariants the schema and handlers
//! enforce together: checkout atomicity, one open payment per booking,
//! the paid gate on completion, and one return per item.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use sewakita_api::error::is_unique_violation;
use sewakita_core::booking::BookingStatus;
use sewakita_core::cart::ItemKind;
use sewakita_core::payment::PaymentStatus;
use sewakita_core::returns::ReturnCondition;
use sewakita_db::models::booking::{BookingWithItems, CheckoutBooking};
use sewakita_db::models::cart_item::{AddCartItem, UpdateCartItem};
use sewakita_db::models::return_record::CreateReturn;
use sewakita_db::repositories::{BookingRepo, CartRepo, PaymentRepo, ReturnRepo};

use common::{body_json, build_test_app_with_pool, request_as};

const OWNER: i64 = 7;
const ADMIN: i64 = 99;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_cart_line(pool: &PgPool, notes: Option<&str>) {
    CartRepo::add(
        pool,
        OWNER,
        &AddCartItem {
            kind: ItemKind::Asset,
            product_id: 10,
            package_id: None,
            quantity: 2,
            unit_price: Decimal::from(50_000),
            notes: notes.map(str::to_owned),
        },
    )
    .await
    .unwrap();
}

async fn checked_out(pool: &PgPool) -> BookingWithItems {
    seed_cart_line(pool, None).await;
    BookingRepo::checkout(
        pool,
        OWNER,
        &CheckoutBooking {
            start_date: date(2025, 2, 1),
            end_date: date(2025, 2, 3),
            notes: None,
        },
    )
    .await
    .unwrap()
    .expect("cart was seeded")
}

async fn confirmed(pool: &PgPool) -> BookingWithItems {
    let booking = checked_out(pool).await;
    BookingRepo::transition(
        pool,
        booking.booking.id,
        BookingStatus::Waiting,
        BookingStatus::Confirmed,
    )
    .await
    .unwrap()
    .expect("booking was waiting");
    booking
}

async fn completed(pool: &PgPool) -> BookingWithItems {
    let booking = confirmed(pool).await;
    let id = booking.booking.id;
    let payment = PaymentRepo::create(pool, id, "SWK-done-1", Decimal::from(100_000), "https://gateway.test/pay/1")
        .await
        .unwrap();
    PaymentRepo::reconcile(pool, payment.id, PaymentStatus::Paid, Some(Utc::now()))
        .await
        .unwrap();
    BookingRepo::transition(pool, id, BookingStatus::Confirmed, BookingStatus::Completed)
        .await
        .unwrap()
        .expect("booking was confirmed");
    booking
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_checkout_leaves_cart_intact(pool: PgPool) {
    seed_cart_line(&pool, None).await;

    // Inverted range trips the bookings date check inside the checkout
    // transaction, after the cart rows were already read and locked.
    let result = BookingRepo::checkout(
        &pool,
        OWNER,
        &CheckoutBooking {
            start_date: date(2025, 2, 10),
            end_date: date(2025, 2, 1),
            notes: None,
        },
    )
    .await;
    assert!(result.is_err());

    let cart = CartRepo::list_by_owner(&pool, OWNER).await.unwrap();
    assert_eq!(cart.len(), 1, "rollback must leave the cart untouched");
    let bookings = BookingRepo::list_by_owner(&pool, OWNER).await.unwrap();
    assert!(bookings.is_empty(), "no booking may survive a failed checkout");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_open_payment_insert_trips_partial_index(pool: PgPool) {
    let booking = confirmed(&pool).await;
    let id = booking.booking.id;

    PaymentRepo::create(&pool, id, "SWK-a", Decimal::from(100_000), "https://gateway.test/pay/a")
        .await
        .unwrap();

    // Second open payment for the same booking, as a racing request that
    // got past the handler's pre-check would insert it.
    let err = PaymentRepo::create(&pool, id, "SWK-b", Decimal::from(100_000), "https://gateway.test/pay/b")
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_payments_open"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_payment_create_reports_payment_pending(pool: PgPool) {
    let booking = confirmed(&pool).await;
    let uri = format!("/api/v1/payments/create/{}", booking.booking.id);

    let app = build_test_app_with_pool(pool.clone());
    let first = request_as(app, Method::POST, &uri, OWNER, "customer", None).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = build_test_app_with_pool(pool.clone());
    let second = request_as(app, Method::POST, &uri, OWNER, "customer", None).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "PAYMENT_PENDING");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn complete_requires_a_paid_payment(pool: PgPool) {
    let booking = confirmed(&pool).await;
    let id = booking.booking.id;
    let uri = format!("/api/v1/bookings/{id}/complete");

    let app = build_test_app_with_pool(pool.clone());
    let blocked = request_as(app, Method::PATCH, &uri, ADMIN, "admin", None).await;
    assert_eq!(blocked.status(), StatusCode::CONFLICT);
    let json = body_json(blocked).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("No paid payment"));

    let payment = PaymentRepo::create(&pool, id, "SWK-c", Decimal::from(100_000), "https://gateway.test/pay/c")
        .await
        .unwrap();
    PaymentRepo::reconcile(&pool, payment.id, PaymentStatus::Paid, Some(Utc::now()))
        .await
        .unwrap();

    let app = build_test_app_with_pool(pool.clone());
    let done = request_as(app, Method::PATCH, &uri, ADMIN, "admin", None).await;
    assert_eq!(done.status(), StatusCode::OK);
    let json = body_json(done).await;
    assert_eq!(json["status"], "COMPLETED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn at_most_one_return_per_item(pool: PgPool) {
    let booking = completed(&pool).await;
    let item_id = booking.items[0].id;
    let body = serde_json::json!({ "booking_item_id": item_id, "condition": "GOOD" });

    let app = build_test_app_with_pool(pool.clone());
    let first = request_as(app, Method::POST, "/api/v1/returns", ADMIN, "admin", Some(body.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = build_test_app_with_pool(pool.clone());
    let second = request_as(app, Method::POST, "/api/v1/returns", ADMIN, "admin", Some(body)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // The unique index is the backstop when the handler pre-check races.
    let err = ReturnRepo::create(
        &pool,
        &CreateReturn {
            booking_item_id: item_id,
            condition: ReturnCondition::Good,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err, "uq_returns_booking_item"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cart_update_without_notes_keeps_existing_notes(pool: PgPool) {
    seed_cart_line(&pool, Some("antar pagi")).await;
    let line = CartRepo::list_by_owner(&pool, OWNER).await.unwrap().remove(0);

    let updated = CartRepo::update(
        &pool,
        line.id,
        OWNER,
        &UpdateCartItem {
            quantity: 5,
            notes: None,
        },
    )
    .await
    .unwrap()
    .expect("line exists");
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.notes.as_deref(), Some("antar pagi"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_booking_reads_resolve_legacy_notes_reason(pool: PgPool) {
    seed_cart_line(&pool, None).await;
    let booking = BookingRepo::checkout(
        &pool,
        OWNER,
        &CheckoutBooking {
            start_date: date(2025, 2, 1),
            end_date: date(2025, 2, 3),
            notes: Some("Alasan ditolak: stok habis".to_owned()),
        },
    )
    .await
    .unwrap()
    .expect("cart was seeded");

    // Imported rows carry the reason in notes only, with no structured
    // column value.
    sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
        .bind(booking.booking.id)
        .bind(BookingStatus::Rejected)
        .execute(&pool)
        .await
        .unwrap();

    let found = BookingRepo::find_by_id(&pool, booking.booking.id)
        .await
        .unwrap()
        .expect("booking exists");
    assert_eq!(found.reject_reason.as_deref(), Some("stok habis"));
}
