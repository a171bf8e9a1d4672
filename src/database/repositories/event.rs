//! Event repository implementation

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, created_by: i64, request: CreateEventRequest) -> Result<Event, FestBuddyError> {
        let coordinators = match request.coordinators {
            Some(contacts) => serde_json::to_value(contacts)?,
            None => serde_json::Value::Array(vec![]),
        };

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, start_date, end_date, location, college_id, created_by,
                                images, max_participants, is_featured, coordinators, rules, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.location)
        .bind(request.college_id)
        .bind(created_by)
        .bind(request.images.unwrap_or_default())
        .bind(request.max_participants.unwrap_or(0))
        .bind(request.is_featured.unwrap_or(false))
        .bind(coordinators)
        .bind(request.rules.unwrap_or_default())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, FestBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List all events, soonest first
    pub async fn list(&self) -> Result<Vec<Event>, FestBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at FROM events ORDER BY start_date"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List featured events
    pub async fn list_featured(&self) -> Result<Vec<Event>, FestBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at FROM events WHERE is_featured = true ORDER BY start_date"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List events hosted by a college
    pub async fn list_by_college(&self, college_id: i64) -> Result<Vec<Event>, FestBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at FROM events WHERE college_id = $1 ORDER BY start_date"
        )
        .bind(college_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List events added by an admin
    pub async fn list_by_admin(&self, admin_id: i64) -> Result<Vec<Event>, FestBuddyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at FROM events WHERE created_by = $1 ORDER BY id"
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count events hosted by a college
    pub async fn count_by_college(&self, college_id: i64) -> Result<i64, FestBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE college_id = $1")
            .bind(college_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Update event
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, FestBuddyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                location = COALESCE($6, location),
                images = COALESCE($7, images),
                max_participants = COALESCE($8, max_participants),
                event_status = COALESCE($9, event_status),
                is_featured = COALESCE($10, is_featured),
                rules = COALESCE($11, rules),
                updated_at = $12
            WHERE id = $1
            RETURNING id, title, description, start_date, end_date, location, college_id, created_by, images, max_participants, event_status, is_featured, sponsor_names, coordinators, rules, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.location)
        .bind(request.images)
        .bind(request.max_participants)
        .bind(request.event_status)
        .bind(request.is_featured)
        .bind(request.rules)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event; sub-events, offerings, sponsors and bookings cascade
    pub async fn delete(&self, id: i64) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Append a sponsor name to the event's free-text sponsor list
    pub async fn append_sponsor_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: i64,
        name: &str,
    ) -> Result<(), FestBuddyError> {
        sqlx::query(
            "UPDATE events SET sponsor_names = array_append(sponsor_names, $2), updated_at = $3 WHERE id = $1"
        )
        .bind(event_id)
        .bind(name)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Remove a sponsor name from the event's free-text sponsor list
    pub async fn remove_sponsor_name(&self, event_id: i64, name: &str) -> Result<(), FestBuddyError> {
        sqlx::query(
            "UPDATE events SET sponsor_names = array_remove(sponsor_names, $2), updated_at = $3 WHERE id = $1"
        )
        .bind(event_id)
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
