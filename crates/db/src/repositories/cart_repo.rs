//! Repository for the `cart_items` table.

use sqlx::PgPool;

use sewakita_core::types::DbId;

use crate::models::cart_item::{AddCartItem, CartItem, UpdateCartItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, kind, product_id, package_id, quantity, \
    unit_price, notes, created_at, updated_at";

/// Provides operations on a user's pending cart lines.
pub struct CartRepo;

impl CartRepo {
    /// List all of an owner's lines, oldest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<CartItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cart_items WHERE owner_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Add a line, merging into an existing line for the same offering.
    ///
    /// The merge key is (owner, kind, product, package); a conflicting add
    /// increments the existing quantity instead of inserting a duplicate.
    pub async fn add(
        pool: &PgPool,
        owner_id: DbId,
        input: &AddCartItem,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items
                (owner_id, kind, product_id, package_id, quantity, unit_price, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (owner_id, kind, product_id, (COALESCE(package_id, 0)))
             DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                notes = COALESCE(EXCLUDED.notes, cart_items.notes),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(owner_id)
            .bind(input.kind)
            .bind(input.product_id)
            .bind(input.package_id)
            .bind(input.quantity)
            .bind(input.unit_price)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Mutate a line's quantity (and optionally notes) in place.
    ///
    /// Notes are patch-style: a null or omitted `notes` keeps the stored
    /// value, so this call can replace notes but never clear them.
    /// Returns `None` if the line does not exist or belongs to another
    /// owner.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateCartItem,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET
                quantity = $3,
                notes = COALESCE($4, notes),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.quantity)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Remove a single line. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove all of an owner's lines. Returns the number removed.
    pub async fn clear(pool: &PgPool, owner_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE owner_id = $1")
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
