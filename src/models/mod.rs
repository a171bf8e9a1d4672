//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod admin;
pub mod college;
pub mod event;
pub mod sub_event;
pub mod booking;
pub mod sponsor;
pub mod payment;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, UpdateUserRequest};
pub use admin::{Admin, AdminSession, CreateAdminRequest};
pub use college::{College, CreateCollegeRequest, UpdateCollegeRequest};
pub use event::{CoordinatorContact, CreateEventRequest, Event, EventDetails, EventStatus, UpdateEventRequest};
pub use sub_event::{
    CreateSubEventRequest, NewSubEventDetail, RegistrationStatus, SubEvent, SubEventDetail,
    SubEventWithDetails, UpdateSubEventRequest,
};
pub use booking::{Booking, BookingReport, CreateBookingRequest, PaymentStatus};
pub use sponsor::{CreateSponsorRequest, Sponsor, UpdateSponsorRequest};
pub use payment::{PaymentConfirmation, PaymentOrder};
