//! Route definitions for the shopping cart.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Cart routes, mounted at `/cart`.
///
/// ```text
/// GET    /           list
/// POST   /           add (merges duplicate lines)
/// DELETE /           clear
/// PATCH  /{id}       update quantity
/// DELETE /{id}       remove line
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).post(cart::add).delete(cart::clear))
        .route("/{id}", patch(cart::update).delete(cart::remove))
}
