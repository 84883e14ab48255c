pub mod booking;
pub mod cart;
pub mod feedback;
pub mod health;
pub mod loan;
pub mod payment;
pub mod returns;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cart                             list, add, clear
/// /cart/{id}                        update, remove
///
/// /bookings/checkout                checkout (cart -> booking)
/// /bookings                         list own
/// /bookings/admin/all               list all (admin)
/// /bookings/{id}                    get, delete
/// /bookings/{id}/approve            approve (admin)
/// /bookings/{id}/reject             reject with reason (admin)
/// /bookings/{id}/cancel             cancel (owner)
/// /bookings/{id}/complete           complete (admin, requires paid)
/// /bookings/{id}/loans              list loans
/// /bookings/{id}/fines              list fines
/// /bookings/{id}/feedback           get feedback
///
/// /payments/create/{booking_id}     create payment (owner)
/// /payments                         list own
/// /payments/{id}                    get
/// /payments/{id}/status             pull gateway status, reconcile
///
/// /loans                            every active loan (admin)
/// /loans/{item_id}/extend           extend due date
///
/// /returns                          record return (admin)
///
/// /fines                            persist fine (admin)
/// /fines/{id}/paid                  mark settled (admin)
///
/// /feedbacks                        submit feedback (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart::router())
        .nest("/bookings", booking::router())
        .nest("/payments", payment::router())
        .nest("/loans", loan::router())
        .nest("/returns", returns::router())
        .nest("/fines", returns::fines_router())
        .nest("/feedbacks", feedback::router())
}
