//! Sub-event model
//!
//! A sub-event is a schedulable activity inside an event (a game tournament,
//! a workshop, a session). Each sub-event carries one or more offerings: the
//! bookable rows holding schedule, fee and capacity. Gaming sub-events have
//! one offering per selectable game; other kinds have a single offering.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubEvent {
    pub id: i64,
    pub event_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub venue: Option<String>,
    pub registration_status: String,
    /// Admin who added the sub-event; NULL once that account is gone
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubEvent {
    pub const GAMING: &'static str = "Gaming";

    /// Whether the admin has switched registrations on
    pub fn registration_open(&self) -> bool {
        self.registration_status == RegistrationStatus::On.as_str()
    }

    pub fn is_gaming(&self) -> bool {
        self.kind == Self::GAMING
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubEventDetail {
    pub id: i64,
    pub sub_event_id: i64,
    pub game_title: Option<String>,
    pub held_on: DateTime<Utc>,
    pub held_at: String,
    pub entry_fee: i64,
    pub max_participants: i32,
    pub registered_participants: i32,
}

impl SubEventDetail {
    /// An offering accepts one more registration when unlimited or not full
    pub fn has_capacity(&self) -> bool {
        self.max_participants == 0 || self.registered_participants < self.max_participants
    }
}

/// Offering payload for create/update; counters default to zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubEventDetail {
    pub game_title: Option<String>,
    pub held_on: DateTime<Utc>,
    pub held_at: String,
    pub entry_fee: Option<i64>,
    pub max_participants: Option<i32>,
    pub registered_participants: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubEventRequest {
    pub event_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub venue: Option<String>,
    pub registration_status: Option<String>,
    pub details: Vec<NewSubEventDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubEventRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub registration_status: Option<String>,
    pub details: Option<Vec<NewSubEventDetail>>,
}

/// Sub-event together with its offerings
#[derive(Debug, Clone, Serialize)]
pub struct SubEventWithDetails {
    pub sub_event: SubEvent,
    pub details: Vec<SubEventDetail>,
}

impl SubEventWithDetails {
    /// Registration gate: status is ON and at least one offering has room
    pub fn accepts_registrations(&self) -> bool {
        self.sub_event.registration_open() && self.details.iter().any(|d| d.has_capacity())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RegistrationStatus {
    On,
    Off,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::On => "ON",
            RegistrationStatus::Off => "OFF",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ON" => Some(RegistrationStatus::On),
            "OFF" => Some(RegistrationStatus::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
