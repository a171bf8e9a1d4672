//! FestBuddy
//!
//! Backend core for a university-festival platform: colleges host events,
//! events contain sub-events with per-offering capacity and entry fees, and
//! participants register through a transactional booking engine that
//! coordinates payment with an external gateway. The service structs are the
//! public interface; no HTTP framework lives in this crate.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FestBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
