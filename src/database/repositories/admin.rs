//! Admin repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::admin::Admin;
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new admin from an already hashed credential
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<Admin, FestBuddyError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, FestBuddyError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, created_at FROM admins WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, FestBuddyError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, created_at FROM admins WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }
}
