//! Repository for the `bookings` and `booking_items` tables.
//!
//! Status transitions are status-conditional updates: the `WHERE` clause
//! pins the expected source state, so a lost race returns zero rows and
//! surfaces as a conflict instead of applying a transition twice.

use sqlx::PgPool;

use sewakita_core::booking::BookingStatus;
use sewakita_core::money;
use sewakita_core::types::DbId;

use crate::models::booking::{Booking, BookingItem, BookingWithItems, CheckoutBooking};
use crate::models::cart_item::CartItem;

const COLUMNS: &str = "id, owner_id, status, start_date, end_date, notes, \
    reject_reason, total_amount, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, booking_id, kind, product_id, package_id, \
    quantity, unit_price, subtotal, due_date";

/// Provides booking creation (checkout) and lifecycle operations.
pub struct BookingRepo;

impl BookingRepo {
    /// Convert the owner's cart into one booking, atomically.
    ///
    /// Reads the cart under a row lock, projects each line 1:1 into a
    /// booking item (quantity and submission-time unit price copied, due
    /// date seeded from `end_date`), caches the total on the booking, and
    /// empties the cart — all in one transaction. Returns `Ok(None)` when
    /// the cart is empty; nothing is created in that case.
    pub async fn checkout(
        pool: &PgPool,
        owner_id: DbId,
        input: &CheckoutBooking,
    ) -> Result<Option<BookingWithItems>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cart_query = "SELECT id, owner_id, kind, product_id, package_id, quantity, \
                unit_price, notes, created_at, updated_at
             FROM cart_items WHERE owner_id = $1 ORDER BY created_at ASC FOR UPDATE";
        let cart: Vec<CartItem> = sqlx::query_as(cart_query)
            .bind(owner_id)
            .fetch_all(&mut *tx)
            .await?;
        if cart.is_empty() {
            return Ok(None);
        }

        let total = money::order_total(cart.iter().map(|line| (line.quantity, line.unit_price)));

        let booking_query = format!(
            "INSERT INTO bookings (owner_id, start_date, end_date, notes, total_amount)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let booking: Booking = sqlx::query_as(&booking_query)
            .bind(owner_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .bind(total)
            .fetch_one(&mut *tx)
            .await?;

        let item_query = format!(
            "INSERT INTO booking_items
                (booking_id, kind, product_id, package_id, quantity, unit_price, subtotal, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(cart.len());
        for line in &cart {
            let item: BookingItem = sqlx::query_as(&item_query)
                .bind(booking.id)
                .bind(line.kind)
                .bind(line.product_id)
                .bind(line.package_id)
                .bind(line.quantity)
                .bind(line.unit_price)
                .bind(money::line_subtotal(line.quantity, line.unit_price))
                .bind(input.end_date)
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        sqlx::query("DELETE FROM cart_items WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(BookingWithItems { booking, items }))
    }

    /// Find a booking by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(booking.map(Booking::with_resolved_reject_reason))
    }

    /// List the items belonging to a booking, in insertion order.
    pub async fn items(pool: &PgPool, booking_id: DbId) -> Result<Vec<BookingItem>, sqlx::Error> {
        let query =
            format!("SELECT {ITEM_COLUMNS} FROM booking_items WHERE booking_id = $1 ORDER BY id");
        sqlx::query_as::<_, BookingItem>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Find a booking and its items.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingWithItems>, sqlx::Error> {
        let Some(booking) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::items(pool, id).await?;
        Ok(Some(BookingWithItems { booking, items }))
    }

    /// List one owner's bookings, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(bookings
            .into_iter()
            .map(Booking::with_resolved_reject_reason)
            .collect())
    }

    /// List every booking, newest first. Admin surface.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY created_at DESC");
        let bookings = sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await?;
        Ok(bookings
            .into_iter()
            .map(Booking::with_resolved_reject_reason)
            .collect())
    }

    /// Apply a status transition conditioned on the expected source state.
    ///
    /// Returns `None` when the booking is no longer in `from`, which the
    /// caller must surface as a conflict.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Reject a waiting booking, recording the structured reason.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $3, reject_reason = $4, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(BookingStatus::Waiting)
            .bind(BookingStatus::Rejected)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a booking, permitted only while still WAITING and only
    /// by its owner. Items cascade. Returns `true` if a row was removed.
    pub async fn hard_delete_waiting(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM bookings WHERE id = $1 AND owner_id = $2 AND status = $3",
        )
        .bind(id)
        .bind(owner_id)
        .bind(BookingStatus::Waiting)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a single booking item.
    pub async fn find_item(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Option<BookingItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM booking_items WHERE id = $1");
        sqlx::query_as::<_, BookingItem>(&query)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an item's due date (loan extension).
    pub async fn set_item_due_date(
        pool: &PgPool,
        item_id: DbId,
        due_date: chrono::NaiveDate,
    ) -> Result<Option<BookingItem>, sqlx::Error> {
        let query = format!(
            "UPDATE booking_items SET due_date = $2 WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, BookingItem>(&query)
            .bind(item_id)
            .bind(due_date)
            .fetch_optional(pool)
            .await
    }
}
