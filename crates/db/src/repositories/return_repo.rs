//! Repository for the `returns` table.

use sqlx::PgPool;

use sewakita_core::types::DbId;

use crate::models::return_record::{CreateReturn, ReturnRecord};

const COLUMNS: &str = "id, booking_item_id, condition, notes, returned_at, created_at";

/// Records item returns. `uq_returns_booking_item` enforces uniqueness.
pub struct ReturnRepo;

impl ReturnRepo {
    /// Record a return for a booking item.
    ///
    /// A second return for the same item violates the unique index and
    /// surfaces as a conflict at the API layer.
    pub async fn create(pool: &PgPool, input: &CreateReturn) -> Result<ReturnRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO returns (booking_item_id, condition, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReturnRecord>(&query)
            .bind(input.booking_item_id)
            .bind(input.condition)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// The return recorded for an item, if any.
    pub async fn find_by_item(
        pool: &PgPool,
        booking_item_id: DbId,
    ) -> Result<Option<ReturnRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM returns WHERE booking_item_id = $1");
        sqlx::query_as::<_, ReturnRecord>(&query)
            .bind(booking_item_id)
            .fetch_optional(pool)
            .await
    }
}
