//! User service
//!
//! Signup, login, profile updates and account deletion. Deletion routes every
//! booking through the registration engine first so offering counters are
//! released before the account row goes away.

use tracing::{debug, info};

use crate::database::repositories::{BookingRepository, UserRepository};
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::registration::RegistrationService;
use crate::utils::errors::{FestBuddyError, Result};
use crate::utils::helpers;

const BCRYPT_COST: u32 = 10;

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
    booking_repository: BookingRepository,
    registration: RegistrationService,
}

impl UserService {
    pub fn new(
        user_repository: UserRepository,
        booking_repository: BookingRepository,
        registration: RegistrationService,
    ) -> Self {
        Self {
            user_repository,
            booking_repository,
            registration,
        }
    }

    /// Register a new user account
    pub async fn signup(&self, request: CreateUserRequest) -> Result<User> {
        let name = helpers::normalize_whitespace(&request.name);
        if name.is_empty() {
            return Err(FestBuddyError::InvalidInput("Name is required".to_string()));
        }
        if !helpers::is_valid_email(&request.email) {
            return Err(FestBuddyError::InvalidInput(format!(
                "Invalid email: {}",
                request.email
            )));
        }
        if let Some(contact) = &request.contact_number {
            if !helpers::is_valid_phone(contact) {
                return Err(FestBuddyError::InvalidInput(format!(
                    "Invalid contact number: {}",
                    contact
                )));
            }
        }

        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(FestBuddyError::EmailTaken {
                email: request.email,
            });
        }

        let password_hash = bcrypt::hash(&request.password, BCRYPT_COST)?;
        let user = self
            .user_repository
            .create(
                &name,
                &request.email,
                &password_hash,
                request.contact_number.as_deref(),
            )
            .await?;

        info!(user_id = user.id, "New user registered");
        Ok(user)
    }

    /// Verify credentials and return the account. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        debug!(email = %email, "User login attempt");

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(FestBuddyError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(FestBuddyError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }

    /// Get user by id
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(FestBuddyError::UserNotFound { user_id })
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repository.list().await
    }

    /// Update profile fields
    pub async fn update_profile(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        if !helpers::is_valid_email(&request.email) {
            return Err(FestBuddyError::InvalidInput(format!(
                "Invalid email: {}",
                request.email
            )));
        }

        let existing = self.get_user(user_id).await?;

        if request.email != existing.email {
            if self
                .user_repository
                .find_by_email(&request.email)
                .await?
                .is_some()
            {
                return Err(FestBuddyError::EmailTaken {
                    email: request.email,
                });
            }
        }

        let user = self.user_repository.update(user_id, request).await?;
        info!(user_id = user.id, "User profile updated");
        Ok(user)
    }

    /// Delete an account. The user's bookings go through the registration
    /// engine one by one so every held slot is released, then the row is
    /// removed.
    pub async fn delete_account(&self, user_id: i64) -> Result<()> {
        self.get_user(user_id).await?;

        let bookings = self.booking_repository.list_by_user(user_id).await?;
        for booking in &bookings {
            self.registration.delete_booking(booking.id).await?;
        }

        self.user_repository.delete(user_id).await?;
        info!(
            user_id = user_id,
            released_bookings = bookings.len(),
            "User account deleted"
        );
        Ok(())
    }
}
