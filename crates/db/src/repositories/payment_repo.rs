//! Repository for the `payments` table.
//!
//! The partial unique index `uq_payments_open` guarantees at most one
//! PENDING payment per booking; a racing second insert surfaces as a
//! unique violation, which the API layer maps to a conflict.

use rust_decimal::Decimal;
use sqlx::PgPool;

use sewakita_core::payment::PaymentStatus;
use sewakita_core::types::{DbId, Timestamp};

use crate::models::payment::Payment;

const COLUMNS: &str = "id, booking_id, gateway_order_id, amount, method, status, \
    payment_url, proof_url, paid_at, created_at, updated_at";

/// Provides payment creation and gateway reconciliation writes.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment registered at the gateway, starting PENDING.
    pub async fn create(
        pool: &PgPool,
        booking_id: DbId,
        gateway_order_id: &str,
        amount: Decimal,
        payment_url: &str,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (booking_id, gateway_order_id, amount, payment_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .bind(gateway_order_id)
            .bind(amount)
            .bind(payment_url)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List payments for bookings owned by `owner_id`, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = "SELECT p.id, p.booking_id, p.gateway_order_id, p.amount, p.method, \
                p.status, p.payment_url, p.proof_url, p.paid_at, p.created_at, p.updated_at
             FROM payments p
             JOIN bookings b ON b.id = p.booking_id
             WHERE b.owner_id = $1
             ORDER BY p.created_at DESC";
        sqlx::query_as::<_, Payment>(query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// The booking's open (non-terminal) payment, if any.
    pub async fn find_open_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE booking_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .bind(PaymentStatus::Pending)
            .fetch_optional(pool)
            .await
    }

    /// The booking's PAID payment, if any. Gates booking completion.
    pub async fn find_paid_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE booking_id = $1 AND status = $2
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .bind(PaymentStatus::Paid)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the local status with the gateway-derived one and, when
    /// given, backfill `paid_at` without clobbering an existing value.
    pub async fn reconcile(
        pool: &PgPool,
        id: DbId,
        status: PaymentStatus,
        paid_at: Option<Timestamp>,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                status = $2,
                paid_at = COALESCE(paid_at, $3),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(status)
            .bind(paid_at)
            .fetch_optional(pool)
            .await
    }
}
