//! Sponsor repository implementation

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use crate::models::sponsor::{CreateSponsorRequest, Sponsor, UpdateSponsorRequest};
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct SponsorRepository {
    pool: PgPool,
}

impl SponsorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a sponsor inside the transaction that also updates the event
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &CreateSponsorRequest,
    ) -> Result<Sponsor, FestBuddyError> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            r#"
            INSERT INTO sponsors (event_id, name, kind, image, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, name, kind, image, created_at
            "#
        )
        .bind(request.event_id)
        .bind(&request.name)
        .bind(&request.kind)
        .bind(&request.image)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(sponsor)
    }

    /// Find sponsor by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Sponsor>, FestBuddyError> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            "SELECT id, event_id, name, kind, image, created_at FROM sponsors WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sponsor)
    }

    /// List all sponsors
    pub async fn list(&self) -> Result<Vec<Sponsor>, FestBuddyError> {
        let sponsors = sqlx::query_as::<_, Sponsor>(
            "SELECT id, event_id, name, kind, image, created_at FROM sponsors ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sponsors)
    }

    /// List sponsors of an event
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Sponsor>, FestBuddyError> {
        let sponsors = sqlx::query_as::<_, Sponsor>(
            "SELECT id, event_id, name, kind, image, created_at FROM sponsors WHERE event_id = $1 ORDER BY id"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sponsors)
    }

    /// Update sponsor
    pub async fn update(&self, id: i64, request: UpdateSponsorRequest) -> Result<Sponsor, FestBuddyError> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            r#"
            UPDATE sponsors
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                image = COALESCE($4, image)
            WHERE id = $1
            RETURNING id, event_id, name, kind, image, created_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.kind)
        .bind(request.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(sponsor)
    }

    /// Delete sponsor
    pub async fn delete(&self, id: i64) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM sponsors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
