//! Route definitions for returns and fines.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::returns;
use crate::state::AppState;

/// Return processing, mounted at `/returns`.
///
/// ```text
/// POST   /                record a return (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(returns::process))
}

/// Fine routes, mounted at `/fines`.
///
/// ```text
/// POST   /                persist a fine (admin)
/// PATCH  /{id}/paid       mark settled (admin)
/// ```
pub fn fines_router() -> Router<AppState> {
    Router::new()
        .route("/", post(returns::create_fine))
        .route("/{id}/paid", patch(returns::mark_fine_paid))
}
