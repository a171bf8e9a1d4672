//! Sub-event service
//!
//! Admin-gated CRUD for sub-events and their offerings. Incoming offering
//! rows are validated before they hit the store: Gaming sub-events need a
//! game title per offering, counters must sit inside the configured bounds.
//! On update the offering rows are replaced wholesale.

use tracing::info;

use crate::database::repositories::{EventRepository, SubEventRepository};
use crate::models::sub_event::{
    CreateSubEventRequest, NewSubEventDetail, RegistrationStatus, SubEvent, SubEventWithDetails,
    UpdateSubEventRequest,
};
use crate::services::auth::AuthService;
use crate::utils::errors::{FestBuddyError, Result};

#[derive(Clone)]
pub struct SubEventService {
    sub_event_repository: SubEventRepository,
    event_repository: EventRepository,
    auth: AuthService,
}

impl SubEventService {
    pub fn new(
        sub_event_repository: SubEventRepository,
        event_repository: EventRepository,
        auth: AuthService,
    ) -> Self {
        Self {
            sub_event_repository,
            event_repository,
            auth,
        }
    }

    pub async fn create(
        &self,
        bearer: &str,
        request: CreateSubEventRequest,
    ) -> Result<SubEventWithDetails> {
        let admin = self.auth.require_admin(bearer).await?;

        self.event_repository
            .find_by_id(request.event_id)
            .await?
            .ok_or(FestBuddyError::EventNotFound {
                event_id: request.event_id,
            })?;

        if let Some(status) = &request.registration_status {
            validate_registration_status(status)?;
        }
        validate_details(&request.kind, &request.details)?;

        let (sub_event, details) = self
            .sub_event_repository
            .create_with_details(admin.id, request)
            .await?;
        info!(
            sub_event_id = sub_event.id,
            event_id = sub_event.event_id,
            admin_id = admin.id,
            offerings = details.len(),
            "Sub-event created"
        );

        Ok(SubEventWithDetails { sub_event, details })
    }

    pub async fn get(&self, sub_event_id: i64) -> Result<SubEventWithDetails> {
        let sub_event = self
            .sub_event_repository
            .find_by_id(sub_event_id)
            .await?
            .ok_or(FestBuddyError::SubEventNotFound { sub_event_id })?;
        let details = self.sub_event_repository.list_details(sub_event_id).await?;

        Ok(SubEventWithDetails { sub_event, details })
    }

    pub async fn list(&self) -> Result<Vec<SubEvent>> {
        self.sub_event_repository.list().await
    }

    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<SubEvent>> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(FestBuddyError::EventNotFound { event_id })?;

        self.sub_event_repository.list_by_event(event_id).await
    }

    pub async fn update(
        &self,
        bearer: &str,
        sub_event_id: i64,
        request: UpdateSubEventRequest,
    ) -> Result<SubEventWithDetails> {
        let admin = self.auth.require_admin(bearer).await?;

        let existing = self.get(sub_event_id).await?;

        if let Some(status) = &request.registration_status {
            validate_registration_status(status)?;
        }
        if let Some(details) = &request.details {
            let kind = request
                .kind
                .as_deref()
                .unwrap_or(&existing.sub_event.kind);
            validate_details(kind, details)?;
        }

        let sub_event = self
            .sub_event_repository
            .update_with_details(sub_event_id, request)
            .await?;
        let details = self.sub_event_repository.list_details(sub_event_id).await?;
        info!(sub_event_id = sub_event.id, admin_id = admin.id, "Sub-event updated");

        Ok(SubEventWithDetails { sub_event, details })
    }

    /// Delete a sub-event. Offerings cascade; existing bookings keep their
    /// tickets with the sub-event reference nulled.
    pub async fn delete(&self, bearer: &str, sub_event_id: i64) -> Result<()> {
        let admin = self.auth.require_admin(bearer).await?;
        self.get(sub_event_id).await?;

        self.sub_event_repository.delete(sub_event_id).await?;
        info!(sub_event_id = sub_event_id, admin_id = admin.id, "Sub-event deleted");
        Ok(())
    }
}

fn validate_registration_status(status: &str) -> Result<()> {
    RegistrationStatus::parse(status)
        .map(|_| ())
        .ok_or_else(|| {
            FestBuddyError::InvalidInput(format!("Unknown registration status: {}", status))
        })
}

fn validate_details(kind: &str, details: &[NewSubEventDetail]) -> Result<()> {
    if details.is_empty() {
        return Err(FestBuddyError::InvalidInput(
            "At least one offering is required".to_string(),
        ));
    }

    let gaming = kind == SubEvent::GAMING;
    if !gaming && details.len() > 1 {
        return Err(FestBuddyError::InvalidInput(
            "Non-gaming sub-events carry a single offering".to_string(),
        ));
    }

    for detail in details {
        if gaming
            && detail
                .game_title
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(FestBuddyError::InvalidInput(
                "Gaming offerings require a game title".to_string(),
            ));
        }
        if detail.held_at.trim().is_empty() {
            return Err(FestBuddyError::InvalidInput(
                "Offering time is required".to_string(),
            ));
        }
        if detail.entry_fee.unwrap_or(0) < 0 {
            return Err(FestBuddyError::InvalidInput(
                "Entry fee cannot be negative".to_string(),
            ));
        }

        let max = detail.max_participants.unwrap_or(0);
        let registered = detail.registered_participants.unwrap_or(0);
        if max < 0 || registered < 0 {
            return Err(FestBuddyError::InvalidInput(
                "Participant counters cannot be negative".to_string(),
            ));
        }
        if max > 0 && registered > max {
            return Err(FestBuddyError::InvalidInput(format!(
                "Registered participants ({}) exceed the limit ({})",
                registered, max
            )));
        }
    }

    Ok(())
}
