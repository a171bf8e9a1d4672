//! Mock payment gateway
//!
//! A wiremock HTTP server standing in for the real gateway's order endpoint,
//! plus signature helpers mirroring what the gateway would send back after a
//! successful checkout.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use FestBuddy::services::payment::compute_signature;

pub const TEST_KEY_SECRET: &str = "festbuddy-gateway-test-secret";

pub struct PaymentGatewayMock {
    pub server: MockServer,
}

impl PaymentGatewayMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve successful order creation with the given order id. The mock
    /// echoes a fixed minor-unit amount the way the gateway reports it back.
    pub async fn mock_create_order(&self, order_id: &str, amount_minor: i64, currency: &str) {
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": order_id,
                "amount": amount_minor,
                "currency": currency,
                "receipt": "rcpt_test",
                "status": "created",
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve an upstream failure for order creation
    pub async fn mock_order_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "description": "order creation refused" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve a response slower than the client timeout
    pub async fn mock_order_delay(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "id": "order_slow",
                        "amount": 100,
                        "currency": "INR",
                        "receipt": "rcpt_slow",
                    }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// The signature a legitimate checkout would return for this order
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        compute_signature(TEST_KEY_SECRET, order_id, payment_id)
    }
}
