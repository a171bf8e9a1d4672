//! Payment order repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::booking::PaymentStatus;
use crate::models::payment::PaymentOrder;
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct PaymentOrderRepository {
    pool: PgPool,
}

impl PaymentOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an order the gateway just created for us
    pub async fn record(
        &self,
        order_id: &str,
        receipt: &str,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentOrder, FestBuddyError> {
        let order = sqlx::query_as::<_, PaymentOrder>(
            r#"
            INSERT INTO payment_orders (order_id, receipt, amount, currency, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, receipt, amount, currency, status, payment_id, created_at, updated_at
            "#
        )
        .bind(order_id)
        .bind(receipt)
        .bind(amount)
        .bind(currency)
        .bind(PaymentStatus::Pending.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Find order by the gateway's order id
    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Option<PaymentOrder>, FestBuddyError> {
        let order = sqlx::query_as::<_, PaymentOrder>(
            "SELECT id, order_id, receipt, amount, currency, status, payment_id, created_at, updated_at FROM payment_orders WHERE order_id = $1"
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Flip an order from Pending to Paid, recording the payment id. The
    /// guard keeps the status check and the flip in one statement; a second
    /// confirmation of the same order finds nothing to update. Returns false
    /// when the order was not Pending anymore (or never existed).
    pub async fn try_settle(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<bool, FestBuddyError> {
        let result = sqlx::query(
            r#"
            UPDATE payment_orders
            SET status = $2,
                payment_id = $3,
                updated_at = $4
            WHERE order_id = $1 AND status = $5
            "#
        )
        .bind(order_id)
        .bind(PaymentStatus::Paid.as_str())
        .bind(payment_id)
        .bind(Utc::now())
        .bind(PaymentStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Record how verification of an order concluded
    pub async fn set_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
        payment_id: Option<&str>,
    ) -> Result<(), FestBuddyError> {
        sqlx::query(
            r#"
            UPDATE payment_orders
            SET status = $2,
                payment_id = COALESCE($3, payment_id),
                updated_at = $4
            WHERE order_id = $1
            "#
        )
        .bind(order_id)
        .bind(status.as_str())
        .bind(payment_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
