//! Admin accounts
//!
//! Registration and login for administrators. Login issues the session token
//! the identity verifier later checks on admin-gated mutations.

use tracing::info;

use crate::database::repositories::{
    AdminRepository, CollegeRepository, EventRepository, SubEventRepository,
};
use crate::models::admin::{Admin, AdminContributions, AdminSession, CreateAdminRequest};
use crate::services::auth::AuthService;
use crate::utils::errors::{FestBuddyError, Result};
use crate::utils::helpers;

const BCRYPT_COST: u32 = 10;

#[derive(Clone)]
pub struct AdminService {
    admin_repository: AdminRepository,
    college_repository: CollegeRepository,
    event_repository: EventRepository,
    sub_event_repository: SubEventRepository,
    auth: AuthService,
}

impl AdminService {
    pub fn new(
        admin_repository: AdminRepository,
        college_repository: CollegeRepository,
        event_repository: EventRepository,
        sub_event_repository: SubEventRepository,
        auth: AuthService,
    ) -> Self {
        Self {
            admin_repository,
            college_repository,
            event_repository,
            sub_event_repository,
            auth,
        }
    }

    /// Register a new admin account
    pub async fn register(&self, request: CreateAdminRequest) -> Result<Admin> {
        if !helpers::is_valid_email(&request.email) {
            return Err(FestBuddyError::InvalidInput(format!(
                "Invalid email: {}",
                request.email
            )));
        }
        if request.password.len() < 8 {
            return Err(FestBuddyError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if self
            .admin_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(FestBuddyError::AdminExists {
                email: request.email,
            });
        }

        let password_hash = bcrypt::hash(&request.password, BCRYPT_COST)?;
        let admin = self
            .admin_repository
            .create(&request.email, &password_hash)
            .await?;

        info!(admin_id = admin.id, "New admin registered");
        Ok(admin)
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession> {
        let admin = self
            .admin_repository
            .find_by_email(email)
            .await?
            .ok_or(FestBuddyError::InvalidCredentials)?;

        if !bcrypt::verify(password, &admin.password_hash)? {
            return Err(FestBuddyError::InvalidCredentials);
        }

        let token = self.auth.issue_token(admin.id)?;
        info!(admin_id = admin.id, "Admin logged in");

        Ok(AdminSession {
            admin_id: admin.id,
            token,
        })
    }

    /// Everything an admin has added, derived from the created_by stamps
    pub async fn contributions(&self, admin_id: i64) -> Result<AdminContributions> {
        self.admin_repository
            .find_by_id(admin_id)
            .await?
            .ok_or(FestBuddyError::AdminNotFound { admin_id })?;

        let colleges = self.college_repository.list_by_admin(admin_id).await?;
        let events = self.event_repository.list_by_admin(admin_id).await?;
        let sub_events = self.sub_event_repository.list_by_admin(admin_id).await?;

        Ok(AdminContributions {
            colleges,
            events,
            sub_events,
        })
    }
}
