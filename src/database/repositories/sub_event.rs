//! Sub-event repository implementation
//!
//! Offerings (sub_event_details rows) are written together with their parent
//! in one transaction, and the capacity counter is only ever moved through
//! the guarded claim/release statements below.

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use crate::models::sub_event::{
    CreateSubEventRequest, NewSubEventDetail, SubEvent, SubEventDetail, UpdateSubEventRequest,
};
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct SubEventRepository {
    pool: PgPool,
}

impl SubEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a sub-event and its offerings atomically, stamped with the
    /// adding admin
    pub async fn create_with_details(
        &self,
        created_by: i64,
        request: CreateSubEventRequest,
    ) -> Result<(SubEvent, Vec<SubEventDetail>), FestBuddyError> {
        let mut tx = self.pool.begin().await?;

        let sub_event = sqlx::query_as::<_, SubEvent>(
            r#"
            INSERT INTO sub_events (event_id, kind, description, venue, registration_status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at
            "#
        )
        .bind(request.event_id)
        .bind(request.kind)
        .bind(request.description)
        .bind(request.venue)
        .bind(request.registration_status.unwrap_or_else(|| "OFF".to_string()))
        .bind(created_by)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let mut details = Vec::with_capacity(request.details.len());
        for detail in request.details {
            details.push(Self::insert_detail(&mut tx, sub_event.id, detail).await?);
        }

        tx.commit().await?;

        Ok((sub_event, details))
    }

    async fn insert_detail(
        tx: &mut Transaction<'_, Postgres>,
        sub_event_id: i64,
        detail: NewSubEventDetail,
    ) -> Result<SubEventDetail, FestBuddyError> {
        let row = sqlx::query_as::<_, SubEventDetail>(
            r#"
            INSERT INTO sub_event_details (sub_event_id, game_title, held_on, held_at, entry_fee, max_participants, registered_participants)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, sub_event_id, game_title, held_on, held_at, entry_fee, max_participants, registered_participants
            "#
        )
        .bind(sub_event_id)
        .bind(detail.game_title)
        .bind(detail.held_on)
        .bind(detail.held_at)
        .bind(detail.entry_fee.unwrap_or(0))
        .bind(detail.max_participants.unwrap_or(0))
        .bind(detail.registered_participants.unwrap_or(0))
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Find sub-event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SubEvent>, FestBuddyError> {
        let sub_event = sqlx::query_as::<_, SubEvent>(
            "SELECT id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at FROM sub_events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub_event)
    }

    /// List all sub-events
    pub async fn list(&self) -> Result<Vec<SubEvent>, FestBuddyError> {
        let sub_events = sqlx::query_as::<_, SubEvent>(
            "SELECT id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at FROM sub_events ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_events)
    }

    /// List sub-events of an event
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<SubEvent>, FestBuddyError> {
        let sub_events = sqlx::query_as::<_, SubEvent>(
            "SELECT id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at FROM sub_events WHERE event_id = $1 ORDER BY id"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_events)
    }

    /// List sub-events added by an admin
    pub async fn list_by_admin(&self, admin_id: i64) -> Result<Vec<SubEvent>, FestBuddyError> {
        let sub_events = sqlx::query_as::<_, SubEvent>(
            "SELECT id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at FROM sub_events WHERE created_by = $1 ORDER BY id"
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_events)
    }

    /// List offerings of a sub-event in insertion order
    pub async fn list_details(&self, sub_event_id: i64) -> Result<Vec<SubEventDetail>, FestBuddyError> {
        let details = sqlx::query_as::<_, SubEventDetail>(
            "SELECT id, sub_event_id, game_title, held_on, held_at, entry_fee, max_participants, registered_participants FROM sub_event_details WHERE sub_event_id = $1 ORDER BY id"
        )
        .bind(sub_event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Update a sub-event; when offerings are provided they replace the
    /// existing rows wholesale, both writes in one transaction
    pub async fn update_with_details(
        &self,
        id: i64,
        request: UpdateSubEventRequest,
    ) -> Result<SubEvent, FestBuddyError> {
        let mut tx = self.pool.begin().await?;

        let sub_event = sqlx::query_as::<_, SubEvent>(
            r#"
            UPDATE sub_events
            SET kind = COALESCE($2, kind),
                description = COALESCE($3, description),
                venue = COALESCE($4, venue),
                registration_status = COALESCE($5, registration_status),
                updated_at = $6
            WHERE id = $1
            RETURNING id, event_id, kind, description, venue, registration_status, created_by, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.kind)
        .bind(request.description)
        .bind(request.venue)
        .bind(request.registration_status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(details) = request.details {
            sqlx::query("DELETE FROM sub_event_details WHERE sub_event_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for detail in details {
                Self::insert_detail(&mut tx, id, detail).await?;
            }
        }

        tx.commit().await?;

        Ok(sub_event)
    }

    /// Delete sub-event; offerings cascade, booking references go NULL
    pub async fn delete(&self, id: i64) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM sub_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Claim one slot on an offering. The guard keeps the check and the
    /// increment in a single statement, so two concurrent claims on the
    /// last slot cannot both succeed. Returns false when the offering is
    /// already full.
    pub async fn try_claim_detail_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail_id: i64,
    ) -> Result<bool, FestBuddyError> {
        let result = sqlx::query(
            r#"
            UPDATE sub_event_details
            SET registered_participants = registered_participants + 1
            WHERE id = $1
              AND (max_participants = 0 OR registered_participants < max_participants)
            "#
        )
        .bind(detail_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Release one slot on an offering, floored at zero
    pub async fn release_detail_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        detail_id: i64,
    ) -> Result<(), FestBuddyError> {
        sqlx::query(
            r#"
            UPDATE sub_event_details
            SET registered_participants = registered_participants - 1
            WHERE id = $1 AND registered_participants > 0
            "#
        )
        .bind(detail_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
