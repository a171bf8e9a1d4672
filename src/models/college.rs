//! College model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct College {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    /// Admin who added the college; NULL once that account is gone
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollegeRequest {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCollegeRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}
