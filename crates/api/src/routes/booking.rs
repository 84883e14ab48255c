//! Route definitions for the booking lifecycle.
//!
//! Booking-scoped loan, fine, and feedback reads are mounted here so the
//! whole `/bookings/{id}` subtree lives in one place.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{booking, feedback, loan, returns};
use crate::state::AppState;

/// Booking routes, mounted at `/bookings`.
///
/// ```text
/// POST   /checkout                  checkout (cart -> booking)
/// GET    /                          list own bookings
/// GET    /admin/all                 list every booking (admin)
/// GET    /{id}                      get with items
/// PATCH  /{id}/approve              WAITING -> CONFIRMED (admin)
/// PATCH  /{id}/reject               WAITING -> REJECTED (admin, reason)
/// PATCH  /{id}/cancel               WAITING -> CANCELLED (owner)
/// PATCH  /{id}/complete             CONFIRMED -> COMPLETED (admin, paid)
/// DELETE /{id}                      hard delete while WAITING (owner)
///
/// GET    /{id}/loans                list loans with derived status
/// GET    /{id}/fines                list fines
/// GET    /{id}/feedback             get feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(booking::checkout))
        .route("/", get(booking::list))
        .route("/admin/all", get(booking::list_all))
        .route("/{id}", get(booking::get_by_id).delete(booking::delete))
        .route("/{id}/approve", patch(booking::approve))
        .route("/{id}/reject", patch(booking::reject))
        .route("/{id}/cancel", patch(booking::cancel))
        .route("/{id}/complete", patch(booking::complete))
        // Same capture name as above; the router requires it to agree.
        .route("/{id}/loans", get(loan::list_by_booking))
        .route("/{id}/fines", get(returns::list_fines_by_booking))
        .route("/{id}/feedback", get(feedback::get_by_booking))
}
