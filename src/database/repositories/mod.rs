//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod admin;
pub mod college;
pub mod event;
pub mod sub_event;
pub mod booking;
pub mod sponsor;
pub mod payment_order;

// Re-export repositories
pub use user::UserRepository;
pub use admin::AdminRepository;
pub use college::CollegeRepository;
pub use event::EventRepository;
pub use sub_event::SubEventRepository;
pub use booking::BookingRepository;
pub use sponsor::SponsorRepository;
pub use payment_order::PaymentOrderRepository;
