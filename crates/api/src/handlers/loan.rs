//! Handlers for the `/loans` resource.
//!
//! A loan is the read-side view of a booking item that is out the door.
//! Status is derived from the due date and the presence of a return at
//! request time; nothing here writes a status column.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sewakita_core::error::CoreError;
use sewakita_core::loan::{extended_due_date, loan_status, LoanStatus};
use sewakita_core::types::DbId;
use sewakita_db::repositories::{BookingRepo, LoanRepo};
use sewakita_db::repositories::loan_repo::LoanRow;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::{Actor, RequireAdmin};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Body for a loan extension.
#[derive(Debug, Deserialize)]
pub struct ExtendLoan {
    pub days: u64,
}

/// A loan row with its status derived as of today.
#[derive(Debug, Serialize)]
pub struct LoanRecord {
    #[serde(flatten)]
    pub loan: LoanRow,
    pub status: LoanStatus,
}

fn with_status(loan: LoanRow, today: NaiveDate) -> LoanRecord {
    let status = loan_status(loan.due_date, loan.returned_at, today);
    LoanRecord { loan, status }
}

/// GET /api/v1/loans
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<LoanRecord>>> {
    let today = Utc::now().date_naive();
    let loans = LoanRepo::list_all(&state.pool).await?;
    Ok(Json(loans.into_iter().map(|l| with_status(l, today)).collect()))
}

/// GET /api/v1/bookings/{booking_id}/loans
pub async fn list_by_booking(
    State(state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<Vec<LoanRecord>>> {
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

    let today = Utc::now().date_naive();
    let loans = LoanRepo::list_by_booking(&state.pool, booking_id).await?;
    Ok(Json(loans.into_iter().map(|l| with_status(l, today)).collect()))
}

/// PATCH /api/v1/loans/{item_id}/extend
///
/// Moves the item's due date forward by `days`, anchored at the later of
/// the current due date and today. The response therefore always reads
/// ONGOING on success.
pub async fn extend(
    State(state): State<AppState>,
    actor: Actor,
    Path(item_id): Path<DbId>,
    Json(input): Json<ExtendLoan>,
) -> AppResult<Json<MessageResponse<LoanRecord>>> {
    let loan = LoanRepo::find_by_item(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Loan",
            id: item_id,
        }))?;
    if !actor.is_admin() && loan.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the booking owner".into(),
        )));
    }
    if loan.returned_at.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking item {item_id} is already returned"
        ))));
    }

    let today = Utc::now().date_naive();
    let new_due = extended_due_date(loan.due_date, today, input.days)?;

    BookingRepo::set_item_due_date(&state.pool, item_id, new_due)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BookingItem",
            id: item_id,
        }))?;

    tracing::info!(
        booking_item_id = item_id,
        old_due = %loan.due_date,
        new_due = %new_due,
        days = input.days,
        "Loan extended"
    );

    let loan = LoanRow {
        due_date: new_due,
        ..loan
    };
    Ok(Json(MessageResponse {
        message: "Loan extended".into(),
        body: with_status(loan, today),
    }))
}
