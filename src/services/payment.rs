//! Payment gateway adapter
//!
//! Order creation goes over HTTPS to the gateway with basic auth; signature
//! verification is local: HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed
//! with the shared secret, hex-encoded and compared in constant time. The
//! gateway owns the order lifecycle; we keep a local audit row per order.

use std::time::Duration;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::config::PaymentConfig;
use crate::database::repositories::PaymentOrderRepository;
use crate::models::booking::PaymentStatus;
use crate::models::payment::PaymentOrder;
use crate::utils::errors::{FestBuddyError, GatewayError, Result};
use crate::utils::helpers;

type HmacSha256 = Hmac<Sha256>;

/// Order object returned by the gateway, passed to the client unmodified
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order id, e.g. "order_EKwxwAgItmmXdp"
    pub id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Clone)]
#[derive(Debug)]
pub struct PaymentService {
    client: Client,
    order_repository: PaymentOrderRepository,
    config: PaymentConfig,
}

impl PaymentService {
    pub fn new(order_repository: PaymentOrderRepository, config: PaymentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FestBuddy/1.0")
            .build()
            .map_err(FestBuddyError::Http)?;

        Ok(Self {
            client,
            order_repository,
            config,
        })
    }

    /// Configured checkout currency
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Create a gateway order for a display-unit amount. The amount is
    /// converted to minor units (x100) before it reaches the gateway, and a
    /// fresh opaque receipt id is attached. The order is recorded locally
    /// before being handed back.
    pub async fn create_order(&self, amount: i64, currency: &str) -> Result<GatewayOrder> {
        let amount_minor = amount * 100;
        let receipt = helpers::generate_receipt_id();

        debug!(amount = amount_minor, currency = currency, receipt = %receipt, "Creating gateway order");

        let url = format!("{}/orders", self.config.api_url);
        let body = CreateOrderBody {
            amount: amount_minor,
            currency,
            receipt: &receipt,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FestBuddyError::Gateway(GatewayError::Timeout)
                } else if e.is_connect() {
                    FestBuddyError::Gateway(GatewayError::ServiceUnavailable)
                } else {
                    FestBuddyError::Gateway(GatewayError::RequestFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gateway rejected order creation");
            return Err(FestBuddyError::Gateway(GatewayError::RequestFailed(
                format!("HTTP {}: {}", status, error_text),
            )));
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| FestBuddyError::Gateway(GatewayError::InvalidResponse(e.to_string())))?;

        self.order_repository
            .record(&order.id, &order.receipt, order.amount, &order.currency)
            .await?;

        info!(order_id = %order.id, amount = order.amount, "Gateway order created");
        Ok(order)
    }

    /// Recompute the checkout signature and compare it to the one the client
    /// returned. True only on an exact match.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(&self.config.key_secret, order_id, payment_id, signature)
    }

    /// Flip an order from Pending to Paid atomically; false means the order
    /// was already settled or never recorded
    pub async fn settle_order(&self, order_id: &str, payment_id: &str) -> Result<bool> {
        self.order_repository.try_settle(order_id, payment_id).await
    }

    /// Record how verification of an order concluded
    pub async fn mark_order(
        &self,
        order_id: &str,
        status: PaymentStatus,
        payment_id: Option<&str>,
    ) -> Result<()> {
        self.order_repository
            .set_status(order_id, status, payment_id)
            .await
    }

    /// Look up the local audit row for an order
    pub async fn find_order(&self, order_id: &str) -> Result<Option<PaymentOrder>> {
        self.order_repository.find_by_order_id(order_id).await
    }
}

/// Expected checkout signature: hex HMAC-SHA256 of "{order_id}|{payment_id}"
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    helpers::encode_hex(&mac.finalize().into_bytes())
}

pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let expected = compute_signature(secret, order_id, payment_id);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}
