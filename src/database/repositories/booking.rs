//! Booking repository implementation
//!
//! Booking rows are only written inside registration engine transactions;
//! the plain pool methods here are reads.

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use crate::models::booking::{Booking, BookingReport, CreateBookingRequest, PaymentStatus};
use crate::utils::errors::FestBuddyError;
use crate::utils::helpers;

const REPORT_QUERY: &str = r#"
SELECT b.id, b.ticket_number, b.payment_status, b.additional_info, b.college, b.contact, b.registered_on,
       e.title AS event_title,
       c.name AS college_name,
       se.kind AS sub_event_kind,
       se.description AS sub_event_description,
       se.venue AS sub_event_venue,
       u.name AS user_name,
       u.email AS user_email
FROM bookings b
JOIN events e ON e.id = b.event_id
JOIN colleges c ON c.id = e.college_id
JOIN users u ON u.id = b.user_id
LEFT JOIN sub_events se ON se.id = b.sub_event_id
"#;

#[derive(Clone)]
#[derive(Debug)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a booking inside an engine transaction. A ticket number is
    /// generated only when the caller did not bring one; pre-set values win.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &CreateBookingRequest,
        payment_status: PaymentStatus,
        ticket_number: Option<String>,
    ) -> Result<Booking, FestBuddyError> {
        let ticket_number = ticket_number.unwrap_or_else(helpers::generate_ticket_number);

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (event_id, user_id, sub_event_id, additional_info, payment_status, ticket_number, college, contact, registered_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, event_id, user_id, sub_event_id, additional_info, payment_status, ticket_number, college, contact, registered_on
            "#
        )
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(request.sub_event_id)
        .bind(request.additional_info.clone().unwrap_or_default())
        .bind(payment_status.as_str())
        .bind(ticket_number)
        .bind(&request.college)
        .bind(&request.contact)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking)
    }

    /// Delete a booking inside an engine transaction
    pub async fn delete_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Find booking by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, FestBuddyError> {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT id, event_id, user_id, sub_event_id, additional_info, payment_status, ticket_number, college, contact, registered_on FROM bookings WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// List raw bookings of a user, oldest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, FestBuddyError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, event_id, user_id, sub_event_id, additional_info, payment_status, ticket_number, college, contact, registered_on FROM bookings WHERE user_id = $1 ORDER BY id"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// List raw bookings of an event
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, FestBuddyError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, event_id, user_id, sub_event_id, additional_info, payment_status, ticket_number, college, contact, registered_on FROM bookings WHERE event_id = $1 ORDER BY id"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// All bookings joined with event, college, sub-event and user names
    pub async fn list_reports(&self) -> Result<Vec<BookingReport>, FestBuddyError> {
        let reports = sqlx::query_as::<_, BookingReport>(
            &format!("{REPORT_QUERY} ORDER BY b.registered_on DESC")
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Report row for a single booking
    pub async fn report_by_id(&self, id: i64) -> Result<Option<BookingReport>, FestBuddyError> {
        let report = sqlx::query_as::<_, BookingReport>(
            &format!("{REPORT_QUERY} WHERE b.id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    /// Report rows for everything a user has booked
    pub async fn reports_by_user(&self, user_id: i64) -> Result<Vec<BookingReport>, FestBuddyError> {
        let reports = sqlx::query_as::<_, BookingReport>(
            &format!("{REPORT_QUERY} WHERE b.user_id = $1 ORDER BY b.registered_on DESC")
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Count total bookings
    pub async fn count(&self) -> Result<i64, FestBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
