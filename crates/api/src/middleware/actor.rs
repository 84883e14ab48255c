//! Actor extractors.
//!
//! Authentication is external: an upstream auth proxy resolves the
//! session and forwards the actor as `x-user-id` / `x-user-role` headers.
//! These extractors consume that already-resolved identity; no token
//! handling happens in this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sewakita_core::error::CoreError;
use sewakita_core::roles::ROLE_ADMIN;
use sewakita_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The resolved actor for the current request.
///
/// Use this as an extractor parameter in any handler that requires an
/// authenticated caller:
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<Json<()>> {
///     tracing::info!(user_id = actor.user_id, role = %actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Actor {
    /// The actor's internal database id.
    pub user_id: DbId,
    /// The actor's role name (`"admin"` or `"customer"`).
    pub role: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<DbId>().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing or invalid x-user-id header".into(),
                ))
            })?;

        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-user-role header".into(),
                ))
            })?;

        Ok(Actor { user_id, role })
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(actor): RequireAdmin) -> AppResult<Json<()>> {
///     // actor is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = Actor::from_request_parts(parts, state).await?;
        if !actor.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(actor))
    }
}
