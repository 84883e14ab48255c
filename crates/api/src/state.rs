use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sewakita_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Payment gateway client. A trait object so tests can substitute a
    /// mock without a network.
    pub gateway: Arc<dyn PaymentGateway>,
}
