//! Event service
//!
//! Admin-gated mutations over events plus the populated reads the detail
//! pages need (college, sub-events with offerings, sponsors in one shot).
//! Deleting an event cascades to its sub-events, offerings, sponsors and
//! bookings at the schema level.

use tracing::info;

use crate::database::DatabaseService;
use crate::models::event::{
    CreateEventRequest, Event, EventDetails, EventStatus, UpdateEventRequest,
};
use crate::models::sub_event::SubEventWithDetails;
use crate::services::auth::AuthService;
use crate::utils::errors::{FestBuddyError, Result};

#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
    auth: AuthService,
}

impl EventService {
    pub fn new(db: DatabaseService, auth: AuthService) -> Self {
        Self { db, auth }
    }

    /// Create an event under a college, stamped with the creating admin
    pub async fn create(&self, bearer: &str, request: CreateEventRequest) -> Result<Event> {
        let admin = self.auth.require_admin(bearer).await?;

        if request.title.trim().is_empty() {
            return Err(FestBuddyError::InvalidInput(
                "Event title is required".to_string(),
            ));
        }
        if request.end_date < request.start_date {
            return Err(FestBuddyError::InvalidInput(
                "Event end date precedes its start date".to_string(),
            ));
        }

        self.db
            .colleges
            .find_by_id(request.college_id)
            .await?
            .ok_or(FestBuddyError::CollegeNotFound {
                college_id: request.college_id,
            })?;

        let event = self.db.events.create(admin.id, request).await?;
        info!(event_id = event.id, admin_id = admin.id, "Event created");
        Ok(event)
    }

    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(FestBuddyError::EventNotFound { event_id })
    }

    /// Event joined with everything a detail page renders
    pub async fn get_details(&self, event_id: i64) -> Result<EventDetails> {
        let event = self.get(event_id).await?;

        let college = self
            .db
            .colleges
            .find_by_id(event.college_id)
            .await?
            .ok_or(FestBuddyError::CollegeNotFound {
                college_id: event.college_id,
            })?;

        let sub_events = self.db.sub_events.list_by_event(event_id).await?;
        let sub_events = futures::future::try_join_all(sub_events.into_iter().map(
            |sub_event| async move {
                let details = self.db.sub_events.list_details(sub_event.id).await?;
                Ok::<_, FestBuddyError>(SubEventWithDetails { sub_event, details })
            },
        ))
        .await?;

        let sponsors = self.db.sponsors.list_by_event(event_id).await?;

        Ok(EventDetails {
            event,
            college,
            sub_events,
            sponsors,
        })
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.db.events.list().await
    }

    pub async fn list_featured(&self) -> Result<Vec<Event>> {
        self.db.events.list_featured().await
    }

    pub async fn update(
        &self,
        bearer: &str,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        let admin = self.auth.require_admin(bearer).await?;
        self.get(event_id).await?;

        if let Some(status) = &request.event_status {
            let known = [EventStatus::Upcoming.as_str(), EventStatus::Ongoing.as_str()];
            if !known.contains(&status.as_str()) {
                return Err(FestBuddyError::InvalidInput(format!(
                    "Unknown event status: {}",
                    status
                )));
            }
        }

        let event = self.db.events.update(event_id, request).await?;
        info!(event_id = event.id, admin_id = admin.id, "Event updated");
        Ok(event)
    }

    pub async fn delete(&self, bearer: &str, event_id: i64) -> Result<()> {
        let admin = self.auth.require_admin(bearer).await?;
        self.get(event_id).await?;

        self.db.events.delete(event_id).await?;
        info!(event_id = event_id, admin_id = admin.id, "Event deleted");
        Ok(())
    }
}
