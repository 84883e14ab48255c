//! Payment gateway client.
//!
//! The engine never settles money itself: it registers a transaction at
//! the gateway and later pulls the gateway's view of it. Everything
//! method-specific (bank transfer, e-wallet, card) is the gateway's
//! problem, reached through the hosted checkout page at `redirect_url`.

mod snap;

pub use snap::SnapGateway;

use async_trait::async_trait;

/// Errors from the payment gateway client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Network-level failure talking to the gateway. Propagated verbatim;
    /// retry policy, if any, belongs to the caller.
    #[error("gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered but refused the request.
    #[error("gateway rejected request: {0}")]
    Rejected(String),

    /// The gateway answered with something this client cannot read.
    #[error("malformed gateway response: {0}")]
    Malformed(String),
}

/// A transaction freshly registered at the gateway.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// URL of the hosted checkout page the user is redirected to.
    pub redirect_url: String,
}

/// The gateway's current view of a transaction.
///
/// `gross_amount` arrives as a decimal string and must be parsed before
/// any comparison.
#[derive(Debug, Clone)]
pub struct GatewayTransaction {
    pub order_id: String,
    pub transaction_status: String,
    pub gross_amount: Option<String>,
    /// Settlement time as reported by the gateway, when settled.
    pub settlement_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Create-and-poll interface to the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a transaction, returning the hosted checkout session.
    async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: &rust_decimal::Decimal,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Fetch the gateway's authoritative view of a transaction.
    async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<GatewayTransaction, GatewayError>;
}
