//! Handlers for returns and fines.
//!
//! Returns are recorded per booking item by an admin, only once, and
//! only on COMPLETED bookings. A damaged or lost condition yields a
//! *proposed* fine in the response; the fine becomes real only when the
//! admin persists it through the fines endpoint, possibly with an edited
//! amount.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use sewakita_core::booking::BookingStatus;
use sewakita_core::error::CoreError;
use sewakita_core::returns::proposed_fine;
use sewakita_core::types::DbId;
use sewakita_db::models::fine::{CreateFine, Fine};
use sewakita_db::models::return_record::{CreateReturn, ReturnRecord};
use sewakita_db::repositories::{BookingRepo, FineRepo, ReturnRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::{Actor, RequireAdmin};
use crate::response::MessageResponse;
use crate::state::AppState;

/// An unpersisted fine suggestion attached to a return response.
#[derive(Debug, Serialize)]
pub struct ProposedFine {
    pub booking_id: DbId,
    pub amount: Decimal,
    pub notes: String,
}

/// Response for a processed return.
#[derive(Debug, Serialize)]
pub struct ProcessedReturn {
    #[serde(rename = "return")]
    pub record: ReturnRecord,
    /// Present only when the condition warrants a fine.
    pub proposed_fine: Option<ProposedFine>,
}

/// POST /api/v1/returns
pub async fn process(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateReturn>,
) -> AppResult<(StatusCode, Json<MessageResponse<ProcessedReturn>>)> {
    let item = BookingRepo::find_item(&state.pool, input.booking_item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BookingItem",
            id: input.booking_item_id,
        }))?;

    let booking = BookingRepo::find_by_id(&state.pool, item.booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: item.booking_id,
        }))?;
    if booking.status != BookingStatus::Completed {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking {} is {}, returns require COMPLETED",
            booking.id, booking.status
        ))));
    }

    // Friendly pre-check; the unique index is the real guard.
    if ReturnRepo::find_by_item(&state.pool, input.booking_item_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking item {} is already returned",
            input.booking_item_id
        ))));
    }

    let record = ReturnRepo::create(&state.pool, &input).await?;

    let proposed = proposed_fine(record.condition).map(|amount| ProposedFine {
        booking_id: booking.id,
        amount,
        notes: format!(
            "Item {} returned {}",
            record.booking_item_id, record.condition
        ),
    });

    tracing::info!(
        return_id = record.id,
        booking_item_id = record.booking_item_id,
        condition = %record.condition,
        fine_proposed = proposed.is_some(),
        "Return processed"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Return recorded".into(),
            body: ProcessedReturn {
                record,
                proposed_fine: proposed,
            },
        }),
    ))
}

/// POST /api/v1/fines
///
/// Persists a fine. The amount is the admin's final word and may differ
/// from the proposed schedule.
pub async fn create_fine(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateFine>,
) -> AppResult<(StatusCode, Json<MessageResponse<Fine>>)> {
    if input.amount <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Fine amount must be positive: {}",
            input.amount
        ))));
    }
    BookingRepo::find_by_id(&state.pool, input.booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: input.booking_id,
        }))?;

    let fine = FineRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Fine recorded".into(),
            body: fine,
        }),
    ))
}

/// PATCH /api/v1/fines/{id}/paid
pub async fn mark_fine_paid(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<Fine>>> {
    let fine = FineRepo::mark_paid(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fine", id }))?;
    Ok(Json(MessageResponse {
        message: "Fine settled".into(),
        body: fine,
    }))
}

/// GET /api/v1/bookings/{booking_id}/fines
pub async fn list_fines_by_booking(
    State(state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<Vec<Fine>>> {
    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    if !actor.is_admin() && booking.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the booking owner".into(),
        )));
    }

    let fines = FineRepo::list_by_booking(&state.pool, booking_id).await?;
    Ok(Json(fines))
}
