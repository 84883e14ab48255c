//! Repository for the `fines` table.

use sqlx::PgPool;

use sewakita_core::types::DbId;

use crate::models::fine::{CreateFine, Fine};

const COLUMNS: &str = "id, booking_id, amount, notes, paid, created_at, updated_at";

/// Persists admin-finalized fines.
pub struct FineRepo;

impl FineRepo {
    /// Persist a fine. The amount is whatever the admin settled on, which
    /// may differ from the proposed schedule.
    pub async fn create(pool: &PgPool, input: &CreateFine) -> Result<Fine, sqlx::Error> {
        let query = format!(
            "INSERT INTO fines (booking_id, amount, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fine>(&query)
            .bind(input.booking_id)
            .bind(input.amount)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List a booking's fines, oldest first.
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Fine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fines WHERE booking_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Fine>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a fine settled. Returns `None` if it does not exist.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Fine>, sqlx::Error> {
        let query = format!(
            "UPDATE fines SET paid = TRUE, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
