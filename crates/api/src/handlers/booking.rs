//! Handlers for the `/bookings` resource.
//!
//! Checkout converts the caller's cart into exactly one booking; every
//! later mutation is a state-machine transition. Transitions are applied
//! as status-conditional writes, so a double-submission loses the race
//! and surfaces as a 409 rather than silently succeeding twice.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use sewakita_core::booking::{validate_transition, BookingStatus};
use sewakita_core::cart::validate_date_range;
use sewakita_core::error::CoreError;
use sewakita_core::types::DbId;
use sewakita_db::models::booking::{Booking, BookingWithItems, CheckoutBooking};
use sewakita_db::repositories::{BookingRepo, CartRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::{Actor, RequireAdmin};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Body for the reject transition. The reason is structural, not a notes
/// convention.
#[derive(Debug, Deserialize)]
pub struct RejectBooking {
    pub reason: String,
}

/// POST /api/v1/bookings/checkout
///
/// All-or-nothing: either a WAITING booking exists and the cart is empty
/// afterwards, or neither side effect happened.
pub async fn checkout(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CheckoutBooking>,
) -> AppResult<(StatusCode, Json<MessageResponse<BookingEnvelope>>)> {
    validate_date_range(input.start_date, input.end_date)?;

    // Local precondition; the repository re-checks under the row lock.
    let cart = CartRepo::list_by_owner(&state.pool, actor.user_id).await?;
    if cart.is_empty() {
        return Err(AppError::Core(CoreError::Validation("Cart is empty".into())));
    }

    let booking = BookingRepo::checkout(&state.pool, actor.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Cart is empty".into())))?;

    tracing::info!(
        booking_id = booking.booking.id,
        owner_id = actor.user_id,
        items = booking.items.len(),
        total = %booking.booking.total_amount,
        "Checkout created booking"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Booking created".into(),
            body: BookingEnvelope { booking },
        }),
    ))
}

/// Wrapper giving the response its `booking` key.
#[derive(Debug, serde::Serialize)]
pub struct BookingEnvelope {
    pub booking: BookingWithItems,
}

/// GET /api/v1/bookings
pub async fn list(State(state): State<AppState>, actor: Actor) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_by_owner(&state.pool, actor.user_id).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/bookings/admin/all
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_all(&state.pool).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingWithItems>> {
    let booking = BookingRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    require_owner_or_admin(&actor, booking.booking.owner_id)?;
    Ok(Json(booking))
}

/// PATCH /api/v1/bookings/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<Booking>>> {
    let current = load_booking(&state, id).await?;
    validate_transition(current.status, BookingStatus::Confirmed)?;

    let booking =
        BookingRepo::transition(&state.pool, id, BookingStatus::Waiting, BookingStatus::Confirmed)
            .await?
            .ok_or_else(|| lost_transition_race(id, BookingStatus::Confirmed))?;

    Ok(Json(MessageResponse {
        message: "Booking approved".into(),
        body: booking,
    }))
}

/// PATCH /api/v1/bookings/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectBooking>,
) -> AppResult<Json<MessageResponse<Booking>>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Rejection requires a reason".into(),
        )));
    }

    let current = load_booking(&state, id).await?;
    validate_transition(current.status, BookingStatus::Rejected)?;

    let booking = BookingRepo::reject(&state.pool, id, input.reason.trim())
        .await?
        .ok_or_else(|| lost_transition_race(id, BookingStatus::Rejected))?;

    Ok(Json(MessageResponse {
        message: "Booking rejected".into(),
        body: booking,
    }))
}

/// PATCH /api/v1/bookings/{id}/cancel
///
/// Owner-only. A CONFIRMED booking can no longer be self-cancelled.
pub async fn cancel(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<Booking>>> {
    let current = load_booking(&state, id).await?;
    if current.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the booking owner may cancel".into(),
        )));
    }
    validate_transition(current.status, BookingStatus::Cancelled)?;

    let booking =
        BookingRepo::transition(&state.pool, id, BookingStatus::Waiting, BookingStatus::Cancelled)
            .await?
            .ok_or_else(|| lost_transition_race(id, BookingStatus::Cancelled))?;

    Ok(Json(MessageResponse {
        message: "Booking cancelled".into(),
        body: booking,
    }))
}

/// PATCH /api/v1/bookings/{id}/complete
///
/// Requires a PAID payment on top of the CONFIRMED status. This is the
/// sole gate unlocking return processing and feedback.
pub async fn complete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<Booking>>> {
    let current = load_booking(&state, id).await?;
    validate_transition(current.status, BookingStatus::Completed)?;

    if PaymentRepo::find_paid_by_booking(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "No paid payment recorded for booking {id}"
        ))));
    }

    let booking = BookingRepo::transition(
        &state.pool,
        id,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
    )
    .await?
    .ok_or_else(|| lost_transition_race(id, BookingStatus::Completed))?;

    Ok(Json(MessageResponse {
        message: "Booking completed".into(),
        body: booking,
    }))
}

/// DELETE /api/v1/bookings/{id}
///
/// Hard delete, permitted only to the owner and only while WAITING.
pub async fn delete(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let current = load_booking(&state, id).await?;
    if current.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the booking owner may delete".into(),
        )));
    }
    if current.status != BookingStatus::Waiting {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Only WAITING bookings can be deleted, booking {id} is {}",
            current.status
        ))));
    }

    let deleted = BookingRepo::hard_delete_waiting(&state.pool, id, actor.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        // The status changed between the read and the delete.
        Err(AppError::Core(CoreError::Conflict(format!(
            "Booking {id} is no longer WAITING"
        ))))
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

async fn load_booking(state: &AppState, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
}

fn require_owner_or_admin(actor: &Actor, owner_id: DbId) -> AppResult<()> {
    if actor.is_admin() || actor.user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not the booking owner".into(),
        )))
    }
}

/// The conditional update matched zero rows: another request moved the
/// booking first.
fn lost_transition_race(id: DbId, to: BookingStatus) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Booking {id} changed state concurrently; transition to {to} not applied"
    )))
}
