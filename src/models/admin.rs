//! Admin model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::college::College;
use crate::models::event::Event;
use crate::models::sub_event::SubEvent;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful admin login
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub admin_id: i64,
    pub token: String,
}

/// Everything an admin has added, derived from the created_by stamps
#[derive(Debug, Clone, Serialize)]
pub struct AdminContributions {
    pub colleges: Vec<College>,
    pub events: Vec<Event>,
    pub sub_events: Vec<SubEvent>,
}
