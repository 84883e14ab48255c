//! Handlers for the `/payments` resource.
//!
//! Payments are created against CONFIRMED bookings and settled at an
//! external gateway. The local row is a cache of the gateway's state;
//! the status endpoint pulls the authoritative view and reconciles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use sewakita_core::booking::BookingStatus;
use sewakita_core::error::CoreError;
use sewakita_core::money;
use sewakita_core::payment::{from_gateway_status, is_settlement_equivalent, PaymentStatus};
use sewakita_core::types::DbId;
use sewakita_db::models::payment::Payment;
use sewakita_db::repositories::{BookingRepo, PaymentRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Response for payment creation: the row plus the hosted checkout URL.
#[derive(Debug, Serialize)]
pub struct CreatedPayment {
    pub payment: Payment,
    pub payment_url: String,
}

/// Response for a status pull: the reconciled local status, the raw
/// gateway status it was derived from, and the row itself.
#[derive(Debug, Serialize)]
pub struct PaymentStatusView {
    pub payment_status: PaymentStatus,
    pub gateway_status: String,
    pub payment: Payment,
}

/// POST /api/v1/payments/create/{booking_id}
///
/// Registers a transaction at the gateway and records it PENDING. Only
/// one open payment may exist per booking at a time.
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<MessageResponse<CreatedPayment>>)> {
    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    if booking.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the booking owner".into(),
        )));
    }
    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking {booking_id} is {}, payment requires CONFIRMED",
            booking.status
        ))));
    }

    if PaymentRepo::find_open_by_booking(&state.pool, booking_id)
        .await?
        .is_some()
    {
        return Err(AppError::PaymentPending(booking_id));
    }

    // The gateway needs a globally unique order id; the uuid suffix keeps
    // retries after a FAILED attempt distinct.
    let order_id = format!("SWK-{booking_id}-{}", Uuid::new_v4());
    let session = state
        .gateway
        .create_transaction(&order_id, &booking.total_amount)
        .await?;

    // The pre-check above can race a concurrent create; the partial
    // unique index is the real guard, and its trip gets the same signal.
    let payment = match PaymentRepo::create(
        &state.pool,
        booking_id,
        &order_id,
        booking.total_amount,
        &session.redirect_url,
    )
    .await
    {
        Ok(payment) => payment,
        Err(err) if is_unique_violation(&err, "uq_payments_open") => {
            return Err(AppError::PaymentPending(booking_id));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        payment_id = payment.id,
        booking_id,
        order_id = %order_id,
        amount = %payment.amount,
        "Payment registered at gateway"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Payment created".into(),
            body: CreatedPayment {
                payment_url: session.redirect_url,
                payment,
            },
        }),
    ))
}

/// GET /api/v1/payments
pub async fn list(State(state): State<AppState>, actor: Actor) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentRepo::list_by_owner(&state.pool, actor.user_id).await?;
    Ok(Json(payments))
}

/// GET /api/v1/payments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let payment = load_payment_authorized(&state, &actor, id).await?;
    Ok(Json(payment))
}

/// GET /api/v1/payments/{id}/status
///
/// Pulls the gateway's view of the transaction and reconciles the local
/// row with it. `paid_at` is backfilled only for settlement-equivalent
/// statuses, preferring the gateway's settlement time.
pub async fn status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<Json<PaymentStatusView>> {
    let payment = load_payment_authorized(&state, &actor, id).await?;

    let gateway_txn = state
        .gateway
        .transaction_status(&payment.gateway_order_id)
        .await?;

    // Cross-check the gateway's amount against ours. Amounts arrive as
    // decimal strings and must be compared numerically.
    if let Some(raw) = gateway_txn.gross_amount.as_deref() {
        match money::parse_amount(raw) {
            Ok(gross) if gross != payment.amount => {
                tracing::warn!(
                    payment_id = payment.id,
                    local = %payment.amount,
                    gateway = %gross,
                    "Gateway gross amount differs from local amount"
                );
            }
            Ok(_) => {}
            Err(_) => {
                tracing::warn!(
                    payment_id = payment.id,
                    raw,
                    "Unparseable gross amount from gateway"
                );
            }
        }
    }

    let Some(mapped) = from_gateway_status(&gateway_txn.transaction_status) else {
        // Unknown gateway vocabulary: keep the local status untouched.
        tracing::warn!(
            payment_id = payment.id,
            gateway_status = %gateway_txn.transaction_status,
            "Unrecognized gateway transaction status"
        );
        return Ok(Json(PaymentStatusView {
            payment_status: payment.status,
            gateway_status: gateway_txn.transaction_status,
            payment,
        }));
    };

    let paid_at = if is_settlement_equivalent(&gateway_txn.transaction_status) {
        Some(gateway_txn.settlement_time.unwrap_or_else(Utc::now))
    } else {
        None
    };

    let reconciled = PaymentRepo::reconcile(&state.pool, payment.id, mapped, paid_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: payment.id,
        }))?;

    if reconciled.status != payment.status {
        tracing::info!(
            payment_id = reconciled.id,
            from = ?payment.status,
            to = ?reconciled.status,
            "Payment status reconciled from gateway"
        );
    }

    Ok(Json(PaymentStatusView {
        payment_status: reconciled.status,
        gateway_status: gateway_txn.transaction_status,
        payment: reconciled,
    }))
}

/// Load a payment and enforce that the caller owns its booking or is an
/// admin.
async fn load_payment_authorized(
    state: &AppState,
    actor: &Actor,
    id: DbId,
) -> AppResult<Payment> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    if actor.is_admin() {
        return Ok(payment);
    }

    let booking = BookingRepo::find_by_id(&state.pool, payment.booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: payment.booking_id,
        }))?;
    if booking.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the booking owner".into(),
        )));
    }
    Ok(payment)
}
