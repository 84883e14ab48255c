//! Route definitions for loans.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::loan;
use crate::state::AppState;

/// Loan routes, mounted at `/loans`. Extension is keyed by booking item
/// id.
///
/// ```text
/// GET    /                   every active loan (admin)
/// PATCH  /{item_id}/extend   move the due date forward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(loan::list_all))
        .route("/{item_id}/extend", patch(loan::extend))
}
