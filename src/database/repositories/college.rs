//! College repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::college::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct CollegeRepository {
    pool: PgPool,
}

impl CollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new college, stamped with the adding admin
    pub async fn create(
        &self,
        created_by: i64,
        request: CreateCollegeRequest,
    ) -> Result<College, FestBuddyError> {
        let college = sqlx::query_as::<_, College>(
            r#"
            INSERT INTO colleges (name, location, description, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, location, description, created_by, created_at
            "#
        )
        .bind(request.name)
        .bind(request.location)
        .bind(request.description)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(college)
    }

    /// Find college by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<College>, FestBuddyError> {
        let college = sqlx::query_as::<_, College>(
            "SELECT id, name, location, description, created_by, created_at FROM colleges WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(college)
    }

    /// List all colleges
    pub async fn list(&self) -> Result<Vec<College>, FestBuddyError> {
        let colleges = sqlx::query_as::<_, College>(
            "SELECT id, name, location, description, created_by, created_at FROM colleges ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(colleges)
    }

    /// List colleges added by an admin
    pub async fn list_by_admin(&self, admin_id: i64) -> Result<Vec<College>, FestBuddyError> {
        let colleges = sqlx::query_as::<_, College>(
            "SELECT id, name, location, description, created_by, created_at FROM colleges WHERE created_by = $1 ORDER BY id"
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(colleges)
    }

    /// Update college
    pub async fn update(&self, id: i64, request: UpdateCollegeRequest) -> Result<College, FestBuddyError> {
        let college = sqlx::query_as::<_, College>(
            r#"
            UPDATE colleges
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description)
            WHERE id = $1
            RETURNING id, name, location, description, created_by, created_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.location)
        .bind(request.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(college)
    }

    /// Delete college
    pub async fn delete(&self, id: i64) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM colleges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
