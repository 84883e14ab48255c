//! Read model for active loans.
//!
//! A loan row is a joined view over booking items, their booking, and any
//! recorded return. Loan status is *not* selected here: it is a function
//! of wall-clock time and is derived by the caller on every read.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use sewakita_core::cart::ItemKind;
use sewakita_core::types::{DbId, Timestamp};

/// One loaned item with the inputs needed to derive its status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LoanRow {
    pub booking_item_id: DbId,
    pub booking_id: DbId,
    pub owner_id: DbId,
    pub kind: ItemKind,
    pub product_id: DbId,
    pub quantity: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_at: Option<Timestamp>,
}

const LOAN_SELECT: &str = "SELECT bi.id AS booking_item_id, bi.booking_id, b.owner_id, \
        bi.kind, bi.product_id, bi.quantity, b.start_date, bi.due_date, r.returned_at
     FROM booking_items bi
     JOIN bookings b ON b.id = bi.booking_id
     LEFT JOIN returns r ON r.booking_item_id = bi.id
     WHERE b.status IN ('CONFIRMED', 'COMPLETED')";

/// Reads the loan view. Only confirmed or completed bookings produce
/// loans; anything earlier in the lifecycle is not out the door yet.
pub struct LoanRepo;

impl LoanRepo {
    /// All current loans, oldest booking first. Admin surface.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<LoanRow>, sqlx::Error> {
        let query = format!("{LOAN_SELECT} ORDER BY bi.due_date ASC, bi.id ASC");
        sqlx::query_as::<_, LoanRow>(&query).fetch_all(pool).await
    }

    /// Loans belonging to one booking.
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<LoanRow>, sqlx::Error> {
        let query = format!("{LOAN_SELECT} AND bi.booking_id = $1 ORDER BY bi.id ASC");
        sqlx::query_as::<_, LoanRow>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// The loan view of a single booking item, if it is on loan.
    pub async fn find_by_item(
        pool: &PgPool,
        booking_item_id: DbId,
    ) -> Result<Option<LoanRow>, sqlx::Error> {
        let query = format!("{LOAN_SELECT} AND bi.id = $1");
        sqlx::query_as::<_, LoanRow>(&query)
            .bind(booking_item_id)
            .fetch_optional(pool)
            .await
    }
}
