//! Sponsor model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sponsor {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSponsorRequest {
    pub event_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Logo URL
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSponsorRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<String>,
}
