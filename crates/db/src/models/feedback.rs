//! Feedback model and DTO.

use serde::{Deserialize, Serialize};
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `feedbacks` table. One per completed booking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub booking_id: DbId,
    pub owner_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedback {
    pub booking_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
}
