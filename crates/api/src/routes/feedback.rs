//! Route definitions for feedback.

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Feedback routes, mounted at `/feedbacks`. The booking-scoped read
/// lives under `/bookings/{id}/feedback`.
///
/// ```text
/// POST   /                submit feedback (owner, COMPLETED booking)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(feedback::create))
}
