//! Error handling for FestBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the FestBuddy application
#[derive(Error, Debug)]
pub enum FestBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Admin not found: {admin_id}")]
    AdminNotFound { admin_id: i64 },

    #[error("College not found: {college_id}")]
    CollegeNotFound { college_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Sub-event not found: {sub_event_id}")]
    SubEventNotFound { sub_event_id: i64 },

    #[error("Booking not found: {booking_id}")]
    BookingNotFound { booking_id: i64 },

    #[error("Sponsor not found: {sponsor_id}")]
    SponsorNotFound { sponsor_id: i64 },

    #[error("Selected game not found in sub-event offerings: {game_title}")]
    GameNotFound { game_title: String },

    #[error("Sub-event {sub_event_id} has no offerings")]
    SubEventDetailsMissing { sub_event_id: i64 },

    #[error("Registration is closed for sub-event {sub_event_id}")]
    RegistrationClosed { sub_event_id: i64 },

    #[error("Offering {detail_id} is at capacity")]
    CapacityFull { detail_id: i64 },

    #[error("College {college_id} still has events attached")]
    CollegeInUse { college_id: i64 },

    #[error("Email already registered: {email}")]
    EmailTaken { email: String },

    #[error("Admin already exists: {email}")]
    AdminExists { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Payment verification failed for order {order_id}")]
    PaymentVerificationFailed { order_id: String },

    #[error("Payment order not found: {order_id}")]
    PaymentOrderNotFound { order_id: String },

    #[error("Payment order {order_id} is already settled")]
    PaymentOrderSettled { order_id: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Payment gateway specific errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Gateway request timed out")]
    Timeout,

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Payment gateway unavailable")]
    ServiceUnavailable,
}

/// Result type alias for FestBuddy operations
pub type Result<T> = std::result::Result<T, FestBuddyError>;

/// Result type alias for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl FestBuddyError {
    /// HTTP status code this error maps to at a transport boundary
    pub fn http_status(&self) -> u16 {
        match self {
            FestBuddyError::UserNotFound { .. }
            | FestBuddyError::AdminNotFound { .. }
            | FestBuddyError::CollegeNotFound { .. }
            | FestBuddyError::EventNotFound { .. }
            | FestBuddyError::SubEventNotFound { .. }
            | FestBuddyError::BookingNotFound { .. }
            | FestBuddyError::SponsorNotFound { .. }
            | FestBuddyError::GameNotFound { .. }
            | FestBuddyError::SubEventDetailsMissing { .. }
            | FestBuddyError::PaymentOrderNotFound { .. } => 404,
            FestBuddyError::InvalidInput(_) => 422,
            FestBuddyError::EmailTaken { .. }
            | FestBuddyError::AdminExists { .. }
            | FestBuddyError::RegistrationClosed { .. }
            | FestBuddyError::CapacityFull { .. }
            | FestBuddyError::CollegeInUse { .. }
            | FestBuddyError::PaymentOrderSettled { .. } => 409,
            FestBuddyError::InvalidCredentials | FestBuddyError::Authentication(_) => 401,
            FestBuddyError::InvalidToken(_) => 403,
            FestBuddyError::PaymentVerificationFailed { .. } => 400,
            FestBuddyError::Gateway(_) => 502,
            FestBuddyError::ServiceUnavailable(_) => 503,
            _ => 500,
        }
    }

    /// Check if the error is recoverable by retrying the operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            FestBuddyError::Gateway(GatewayError::Timeout) => true,
            FestBuddyError::Gateway(GatewayError::ServiceUnavailable) => true,
            FestBuddyError::Http(_) => true,
            FestBuddyError::ServiceUnavailable(_) => true,
            FestBuddyError::CapacityFull { .. } => false,
            _ => false,
        }
    }
}
