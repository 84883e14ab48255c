//! Handlers for the `/cart` resource.
//!
//! The cart is server-authoritative: every mutation responds with the
//! full reconciled cart view (lines plus recomputed total), which is the
//! signal dependent totals recompute from. Clients may run an optimistic
//! quantity stepper, but the next response corrects it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use sewakita_core::cart::validate_quantity;
use sewakita_core::error::CoreError;
use sewakita_core::money;
use sewakita_core::types::DbId;
use sewakita_db::models::cart_item::{AddCartItem, CartItem, UpdateCartItem};
use sewakita_db::repositories::CartRepo;
use sewakita_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::state::AppState;

/// The owner's cart: lines plus the total derived from them.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

/// Read the authoritative cart state for an owner.
async fn cart_view(pool: &DbPool, owner_id: DbId) -> AppResult<CartView> {
    let items = CartRepo::list_by_owner(pool, owner_id).await?;
    let total = money::order_total(items.iter().map(|line| (line.quantity, line.unit_price)));
    Ok(CartView { items, total })
}

/// GET /api/v1/cart
pub async fn list(State(state): State<AppState>, actor: Actor) -> AppResult<Json<CartView>> {
    Ok(Json(cart_view(&state.pool, actor.user_id).await?))
}

/// POST /api/v1/cart
///
/// Adds a line, merging into an existing line for the same offering.
/// Quantity and price are validated before any query is issued.
pub async fn add(
    State(state): State<AppState>,
    actor: Actor,
    Json(input): Json<AddCartItem>,
) -> AppResult<(StatusCode, Json<CartView>)> {
    validate_quantity(input.quantity)?;
    if input.unit_price < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unit price must not be negative: {}",
            input.unit_price
        ))));
    }

    CartRepo::add(&state.pool, actor.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(cart_view(&state.pool, actor.user_id).await?),
    ))
}

/// PATCH /api/v1/cart/{id}
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCartItem>,
) -> AppResult<Json<CartView>> {
    validate_quantity(input.quantity)?;

    CartRepo::update(&state.pool, id, actor.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;
    Ok(Json(cart_view(&state.pool, actor.user_id).await?))
}

/// DELETE /api/v1/cart/{id}
pub async fn remove(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<DbId>,
) -> AppResult<Json<CartView>> {
    let removed = CartRepo::remove(&state.pool, id, actor.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }));
    }
    Ok(Json(cart_view(&state.pool, actor.user_id).await?))
}

/// DELETE /api/v1/cart
pub async fn clear(State(state): State<AppState>, actor: Actor) -> AppResult<Json<CartView>> {
    CartRepo::clear(&state.pool, actor.user_id).await?;
    Ok(Json(cart_view(&state.pool, actor.user_id).await?))
}
