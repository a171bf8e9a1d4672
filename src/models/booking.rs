//! Booking model
//!
//! Bookings are created and deleted exclusively by the registration engine;
//! everything except `payment_status` is immutable once written.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub sub_event_id: Option<i64>,
    pub additional_info: String,
    pub payment_status: String,
    pub ticket_number: String,
    pub college: String,
    pub contact: String,
    pub registered_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub event_id: i64,
    pub user_id: i64,
    pub sub_event_id: i64,
    pub college: String,
    pub contact: String,
    /// Selected game title for Gaming sub-events; ignored otherwise
    pub additional_info: Option<String>,
}

/// Booking row joined with the names a report consumer wants to see
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingReport {
    pub id: i64,
    pub ticket_number: String,
    pub payment_status: String,
    pub additional_info: String,
    pub college: String,
    pub contact: String,
    pub registered_on: DateTime<Utc>,
    pub event_title: String,
    pub college_name: String,
    pub sub_event_kind: Option<String>,
    pub sub_event_description: Option<String>,
    pub sub_event_venue: Option<String>,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
