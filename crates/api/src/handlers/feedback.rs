//! Handlers for booking feedback.
//!
//! One feedback per booking, owner-only, and only after completion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use sewakita_core::booking::BookingStatus;
use sewakita_core::error::CoreError;
use sewakita_core::feedback::validate_rating;
use sewakita_core::types::DbId;
use sewakita_db::models::feedback::{CreateFeedback, Feedback};
use sewakita_db::repositories::{BookingRepo, FeedbackRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/v1/feedbacks
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<MessageResponse<Feedback>>)> {
    validate_rating(input.rating)?;

    let booking = BookingRepo::find_by_id(&state.pool, input.booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: input.booking_id,
        }))?;
    if booking.owner_id != actor.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the booking owner may leave feedback".into(),
        )));
    }
    if booking.status != BookingStatus::Completed {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking {} is {}, feedback requires COMPLETED",
            booking.id, booking.status
        ))));
    }

    // uq_feedbacks_booking turns a duplicate submission into a conflict.
    let feedback = FeedbackRepo::create(&state.pool, actor.user_id, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Feedback recorded".into(),
            body: feedback,
        }),
    ))
}

/// GET /api/v1/bookings/{booking_id}/feedback
pub async fn get_by_booking(
    State(state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<Feedback>> {
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

    let feedback = FeedbackRepo::find_by_booking(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id: booking_id,
        }))?;
    Ok(Json(feedback))
}
