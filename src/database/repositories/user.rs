//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, UpdateUserRequest};
use crate::utils::errors::FestBuddyError;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already hashed credential
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        contact_number: Option<&str>,
    ) -> Result<User, FestBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, contact_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, contact_number, created_at, updated_at
            "#
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(contact_number)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, FestBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, contact_number, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, FestBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, contact_number, created_at, updated_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile; contact number is kept when not provided
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, FestBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                contact_number = COALESCE($4, contact_number),
                updated_at = $5
            WHERE id = $1
            RETURNING id, name, email, password_hash, contact_number, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.contact_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete user
    pub async fn delete(&self, id: i64) -> Result<(), FestBuddyError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all users, newest first
    pub async fn list(&self) -> Result<Vec<User>, FestBuddyError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, contact_number, created_at, updated_at FROM users ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, FestBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
