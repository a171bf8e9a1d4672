//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::college::College;
use super::sponsor::Sponsor;
use super::sub_event::SubEventWithDetails;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub college_id: i64,
    pub created_by: i64,
    pub images: Vec<String>,
    pub max_participants: i32,
    pub event_status: String,
    pub is_featured: bool,
    pub sponsor_names: Vec<String>,
    pub coordinators: serde_json::Value,
    pub rules: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact entry kept on the event for participants to reach organizers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinatorContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub college_id: i64,
    pub images: Option<Vec<String>>,
    pub max_participants: Option<i32>,
    pub is_featured: Option<bool>,
    pub coordinators: Option<Vec<CoordinatorContact>>,
    pub rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
    pub max_participants: Option<i32>,
    pub event_status: Option<String>,
    pub is_featured: Option<bool>,
    pub rules: Option<Vec<String>>,
}

/// Event joined with everything a detail page needs
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub event: Event,
    pub college: College,
    pub sub_events: Vec<SubEventWithDetails>,
    pub sponsors: Vec<Sponsor>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
