//! Route definitions for payments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Payment routes, mounted at `/payments`.
///
/// ```text
/// POST   /create/{booking_id}   register at gateway (owner, CONFIRMED)
/// GET    /                      list own payments
/// GET    /{id}                  get payment
/// GET    /{id}/status           pull gateway status and reconcile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/{booking_id}", post(payment::create))
        .route("/", get(payment::list))
        .route("/{id}", get(payment::get_by_id))
        .route("/{id}/status", get(payment::status))
}
