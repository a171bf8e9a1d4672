//! Payment order model
//!
//! Local audit record for orders created against the payment gateway. The
//! gateway owns the order lifecycle; these rows track what we asked for and
//! how verification of each order concluded.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentOrder {
    pub id: i64,
    pub order_id: String,
    pub receipt: String,
    /// Amount in minor units, as sent to the gateway
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the client returns after the gateway checkout completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}
