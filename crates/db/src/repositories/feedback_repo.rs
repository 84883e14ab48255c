//! Repository for the `feedbacks` table.

use sqlx::PgPool;

use sewakita_core::types::DbId;

use crate::models::feedback::{CreateFeedback, Feedback};

const COLUMNS: &str = "id, booking_id, owner_id, rating, comment, created_at";

/// Stores one feedback per completed booking.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Submit feedback. A duplicate submission for the same booking
    /// violates `uq_feedbacks_booking` and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedbacks (booking_id, owner_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.booking_id)
            .bind(owner_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// The feedback left for a booking, if any.
    pub async fn find_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedbacks WHERE booking_id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }
}
