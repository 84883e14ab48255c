//! Snap-style HTTP gateway client (Midtrans wire format).

use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::config::GatewayConfig;

use super::{CheckoutSession, GatewayError, GatewayTransaction, PaymentGateway};

/// HTTP client for a Snap-style payment gateway.
pub struct SnapGateway {
    http: reqwest::Client,
    base_url: String,
    server_key: String,
}

impl SnapGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_key: config.server_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapCreateResponse {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SnapStatusResponse {
    order_id: String,
    transaction_status: String,
    gross_amount: Option<String>,
    settlement_time: Option<String>,
    status_message: Option<String>,
}

#[async_trait]
impl PaymentGateway for SnapGateway {
    async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: &Decimal,
    ) -> Result<CheckoutSession, GatewayError> {
        let url = format!("{}/snap/v1/transactions", self.base_url);
        let body = json!({
            "transaction_details": {
                "order_id": order_id,
                "gross_amount": gross_amount.to_string(),
            }
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.server_key, Some(""))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {text}")));
        }

        let created: SnapCreateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        Ok(CheckoutSession {
            redirect_url: created.redirect_url,
        })
    }

    async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<GatewayTransaction, GatewayError> {
        let url = format!("{}/v2/{}/status", self.base_url, order_id);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.server_key, Some(""))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {text}")));
        }

        let raw: SnapStatusResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        if raw.transaction_status.is_empty() {
            return Err(GatewayError::Malformed(
                raw.status_message
                    .unwrap_or_else(|| "missing transaction_status".into()),
            ));
        }

        Ok(GatewayTransaction {
            order_id: raw.order_id,
            transaction_status: raw.transaction_status,
            gross_amount: raw.gross_amount,
            settlement_time: raw.settlement_time.as_deref().and_then(parse_gateway_time),
        })
    }
}

/// Parse the gateway's `YYYY-MM-DD HH:MM:SS` timestamps, which it reports
/// in UTC without an offset.
fn parse_gateway_time(raw: &str) -> Option<chrono::DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gateway_timestamp() {
        let parsed = parse_gateway_time("2025-01-02 09:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_gateway_time("last tuesday").is_none());
    }
}
