//! Services module
//!
//! Business rules live here; repositories stay dumb. The factory wires every
//! service onto the shared pool and configuration.

pub mod admin;
pub mod auth;
pub mod college;
pub mod event;
pub mod payment;
pub mod registration;
pub mod sponsor;
pub mod sub_event;
pub mod user;

// Re-export commonly used services
pub use admin::AdminService;
pub use auth::AuthService;
pub use college::CollegeService;
pub use event::EventService;
pub use payment::{GatewayOrder, PaymentService};
pub use registration::{RegistrationOutcome, RegistrationService};
pub use sponsor::SponsorService;
pub use sub_event::SubEventService;
pub use user::UserService;

use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::utils::errors::Result;

/// Service factory wiring repositories and shared clients into services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth: AuthService,
    pub payment: PaymentService,
    pub registration: RegistrationService,
    pub users: UserService,
    pub admins: AdminService,
    pub colleges: CollegeService,
    pub events: EventService,
    pub sub_events: SubEventService,
    pub sponsors: SponsorService,
}

impl ServiceFactory {
    pub fn new(pool: DatabasePool, settings: &Settings) -> Result<Self> {
        let db = DatabaseService::new(pool.clone());

        let auth = AuthService::new(db.admins.clone(), settings.auth.clone());
        let payment = PaymentService::new(db.payment_orders.clone(), settings.payment.clone())?;
        let registration = RegistrationService::new(
            pool.clone(),
            db.clone(),
            payment.clone(),
            settings.features.clone(),
        );

        let users = UserService::new(db.users.clone(), db.bookings.clone(), registration.clone());
        let admins = AdminService::new(
            db.admins.clone(),
            db.colleges.clone(),
            db.events.clone(),
            db.sub_events.clone(),
            auth.clone(),
        );
        let colleges = CollegeService::new(db.colleges.clone(), db.events.clone(), auth.clone());
        let events = EventService::new(db.clone(), auth.clone());
        let sub_events =
            SubEventService::new(db.sub_events.clone(), db.events.clone(), auth.clone());
        let sponsors = SponsorService::new(
            pool,
            db.sponsors.clone(),
            db.events.clone(),
            auth.clone(),
        );

        Ok(Self {
            auth,
            payment,
            registration,
            users,
            admins,
            colleges,
            events,
            sub_events,
            sponsors,
        })
    }
}
