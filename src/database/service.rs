//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    AdminRepository, BookingRepository, CollegeRepository, DatabasePool, EventRepository,
    PaymentOrderRepository, SponsorRepository, SubEventRepository, UserRepository,
};
use crate::models::sub_event::SubEventWithDetails;
use crate::utils::errors::FestBuddyError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub admins: AdminRepository,
    pub colleges: CollegeRepository,
    pub events: EventRepository,
    pub sub_events: SubEventRepository,
    pub bookings: BookingRepository,
    pub sponsors: SponsorRepository,
    pub payment_orders: PaymentOrderRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            colleges: CollegeRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            sub_events: SubEventRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            sponsors: SponsorRepository::new(pool.clone()),
            payment_orders: PaymentOrderRepository::new(pool),
        }
    }

    /// Fetch a sub-event together with its offerings
    pub async fn sub_event_with_details(
        &self,
        sub_event_id: i64,
    ) -> Result<Option<SubEventWithDetails>, FestBuddyError> {
        let sub_event = match self.sub_events.find_by_id(sub_event_id).await? {
            Some(sub_event) => sub_event,
            None => return Ok(None),
        };
        let details = self.sub_events.list_details(sub_event_id).await?;

        Ok(Some(SubEventWithDetails { sub_event, details }))
    }

    /// System-wide counters for operational visibility
    pub async fn get_system_stats(&self) -> Result<serde_json::Value, FestBuddyError> {
        let users = self.users.count().await?;
        let bookings = self.bookings.count().await?;

        Ok(serde_json::json!({
            "users": users,
            "bookings": bookings,
        }))
    }
}
