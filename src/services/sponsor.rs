//! Sponsor service
//!
//! Sponsors are children of events. Adding one writes two places in one
//! transaction: the sponsor row and the event's free-text sponsor name list.
//! Removal undoes both.

use tracing::info;

use crate::database::repositories::{EventRepository, SponsorRepository};
use crate::database::DatabasePool;
use crate::models::sponsor::{CreateSponsorRequest, Sponsor, UpdateSponsorRequest};
use crate::services::auth::AuthService;
use crate::utils::errors::{FestBuddyError, Result};

#[derive(Clone)]
pub struct SponsorService {
    pool: DatabasePool,
    sponsor_repository: SponsorRepository,
    event_repository: EventRepository,
    auth: AuthService,
}

impl SponsorService {
    pub fn new(
        pool: DatabasePool,
        sponsor_repository: SponsorRepository,
        event_repository: EventRepository,
        auth: AuthService,
    ) -> Self {
        Self {
            pool,
            sponsor_repository,
            event_repository,
            auth,
        }
    }

    pub async fn create(&self, bearer: &str, request: CreateSponsorRequest) -> Result<Sponsor> {
        let admin = self.auth.require_admin(bearer).await?;

        if request.name.trim().is_empty() || request.image.trim().is_empty() {
            return Err(FestBuddyError::InvalidInput(
                "Sponsor name and logo are required".to_string(),
            ));
        }

        self.event_repository
            .find_by_id(request.event_id)
            .await?
            .ok_or(FestBuddyError::EventNotFound {
                event_id: request.event_id,
            })?;

        let mut tx = self.pool.begin().await?;
        let sponsor = self.sponsor_repository.create_in_tx(&mut tx, &request).await?;
        self.event_repository
            .append_sponsor_name(&mut tx, request.event_id, &sponsor.name)
            .await?;
        tx.commit()
            .await
            .map_err(|e| FestBuddyError::TransactionFailed(e.to_string()))?;

        info!(
            sponsor_id = sponsor.id,
            event_id = sponsor.event_id,
            admin_id = admin.id,
            "Sponsor added"
        );
        Ok(sponsor)
    }

    pub async fn get(&self, sponsor_id: i64) -> Result<Sponsor> {
        self.sponsor_repository
            .find_by_id(sponsor_id)
            .await?
            .ok_or(FestBuddyError::SponsorNotFound { sponsor_id })
    }

    pub async fn list(&self) -> Result<Vec<Sponsor>> {
        self.sponsor_repository.list().await
    }

    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Sponsor>> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(FestBuddyError::EventNotFound { event_id })?;

        self.sponsor_repository.list_by_event(event_id).await
    }

    pub async fn update(
        &self,
        bearer: &str,
        sponsor_id: i64,
        request: UpdateSponsorRequest,
    ) -> Result<Sponsor> {
        let admin = self.auth.require_admin(bearer).await?;
        let existing = self.get(sponsor_id).await?;

        let renamed = request
            .name
            .as_deref()
            .is_some_and(|name| name != existing.name);

        let sponsor = self.sponsor_repository.update(sponsor_id, request).await?;
        if renamed {
            self.event_repository
                .remove_sponsor_name(existing.event_id, &existing.name)
                .await?;
            let mut tx = self.pool.begin().await?;
            self.event_repository
                .append_sponsor_name(&mut tx, existing.event_id, &sponsor.name)
                .await?;
            tx.commit()
                .await
                .map_err(|e| FestBuddyError::TransactionFailed(e.to_string()))?;
        }

        info!(sponsor_id = sponsor.id, admin_id = admin.id, "Sponsor updated");
        Ok(sponsor)
    }

    pub async fn delete(&self, bearer: &str, sponsor_id: i64) -> Result<()> {
        let admin = self.auth.require_admin(bearer).await?;
        let sponsor = self.get(sponsor_id).await?;

        self.sponsor_repository.delete(sponsor_id).await?;
        self.event_repository
            .remove_sponsor_name(sponsor.event_id, &sponsor.name)
            .await?;

        info!(sponsor_id = sponsor_id, admin_id = admin.id, "Sponsor removed");
        Ok(())
    }
}
