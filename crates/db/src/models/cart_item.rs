//! Cart line model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sewakita_core::cart::ItemKind;
use sewakita_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub kind: ItemKind,
    pub product_id: DbId,
    pub package_id: Option<DbId>,
    pub quantity: i32,
    /// Catalog price captured when the line was added; never re-fetched.
    pub unit_price: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a line to the cart.
///
/// An add that matches an existing line on (kind, product_id, package_id)
/// merges into it by incrementing the quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub kind: ItemKind,
    pub product_id: DbId,
    pub package_id: Option<DbId>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

/// DTO for mutating an existing line in place.
///
/// Omitted `notes` leave the stored notes unchanged; clearing them
/// requires removing the line and re-adding it without notes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: i32,
    pub notes: Option<String>,
}
