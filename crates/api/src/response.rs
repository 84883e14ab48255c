//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "message": ..., <resource>: ... }` envelope used by mutating
/// endpoints, which always respond with the new authoritative state.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    #[serde(flatten)]
    pub body: T,
}
