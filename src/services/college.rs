//! College service
//!
//! Reads are public; mutations require admin identity. Deletion is blocked
//! while events still point at the college, so the store never holds events
//! with a missing parent.

use tracing::info;

use crate::database::repositories::{CollegeRepository, EventRepository};
use crate::models::college::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::models::event::Event;
use crate::services::auth::AuthService;
use crate::utils::errors::{FestBuddyError, Result};

#[derive(Clone)]
pub struct CollegeService {
    college_repository: CollegeRepository,
    event_repository: EventRepository,
    auth: AuthService,
}

impl CollegeService {
    pub fn new(
        college_repository: CollegeRepository,
        event_repository: EventRepository,
        auth: AuthService,
    ) -> Self {
        Self {
            college_repository,
            event_repository,
            auth,
        }
    }

    pub async fn create(&self, bearer: &str, request: CreateCollegeRequest) -> Result<College> {
        let admin = self.auth.require_admin(bearer).await?;

        if request.name.trim().is_empty() || request.location.trim().is_empty() {
            return Err(FestBuddyError::InvalidInput(
                "College name and location are required".to_string(),
            ));
        }

        let college = self.college_repository.create(admin.id, request).await?;
        info!(college_id = college.id, admin_id = admin.id, "College created");
        Ok(college)
    }

    pub async fn get(&self, college_id: i64) -> Result<College> {
        self.college_repository
            .find_by_id(college_id)
            .await?
            .ok_or(FestBuddyError::CollegeNotFound { college_id })
    }

    pub async fn list(&self) -> Result<Vec<College>> {
        self.college_repository.list().await
    }

    /// Events hosted by a college
    pub async fn events(&self, college_id: i64) -> Result<Vec<Event>> {
        self.get(college_id).await?;
        self.event_repository.list_by_college(college_id).await
    }

    pub async fn update(
        &self,
        bearer: &str,
        college_id: i64,
        request: UpdateCollegeRequest,
    ) -> Result<College> {
        let admin = self.auth.require_admin(bearer).await?;
        self.get(college_id).await?;

        let college = self.college_repository.update(college_id, request).await?;
        info!(college_id = college.id, admin_id = admin.id, "College updated");
        Ok(college)
    }

    /// Delete a college. Refused while events still reference it.
    pub async fn delete(&self, bearer: &str, college_id: i64) -> Result<()> {
        let admin = self.auth.require_admin(bearer).await?;
        self.get(college_id).await?;

        let events = self.event_repository.count_by_college(college_id).await?;
        if events > 0 {
            return Err(FestBuddyError::CollegeInUse { college_id });
        }

        self.college_repository.delete(college_id).await?;
        info!(college_id = college_id, admin_id = admin.id, "College deleted");
        Ok(())
    }
}
