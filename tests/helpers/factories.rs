//! Data factories
//!
//! Builders seeding the entity graph a registration needs: college, event,
//! sub-event with offerings, user. Names and emails come from `fake` so
//! uniqueness constraints never collide across tests.

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use FestBuddy::models::college::CreateCollegeRequest;
use FestBuddy::models::event::{CoordinatorContact, CreateEventRequest, Event};
use FestBuddy::models::sub_event::{CreateSubEventRequest, NewSubEventDetail, SubEventWithDetails};
use FestBuddy::models::user::{CreateUserRequest, User};

use super::context::TestContext;

pub const USER_PASSWORD: &str = "festival-goer-pw";

/// An offering with the given fee and capacity
pub fn offering(game_title: Option<&str>, entry_fee: i64, max_participants: i32) -> NewSubEventDetail {
    NewSubEventDetail {
        game_title: game_title.map(str::to_string),
        held_on: Utc::now() + Duration::days(7),
        held_at: "10:00 AM".to_string(),
        entry_fee: Some(entry_fee),
        max_participants: Some(max_participants),
        registered_participants: None,
    }
}

pub async fn seed_user(
    ctx: &TestContext,
) -> Result<User, Box<dyn std::error::Error + Send + Sync>> {
    let email: String = SafeEmail().fake();
    let user = ctx
        .services
        .users
        .signup(CreateUserRequest {
            name: Name().fake(),
            email: format!("{}-{}", uuid::Uuid::new_v4(), email),
            password: USER_PASSWORD.to_string(),
            contact_number: Some("9876543210".to_string()),
        })
        .await?;

    Ok(user)
}

pub async fn seed_event(
    ctx: &TestContext,
    token: &str,
) -> Result<Event, Box<dyn std::error::Error + Send + Sync>> {
    let college = ctx
        .services
        .colleges
        .create(
            token,
            CreateCollegeRequest {
                name: format!("College {}", uuid::Uuid::new_v4()),
                location: "Pune".to_string(),
                description: None,
            },
        )
        .await?;

    let event = ctx
        .services
        .events
        .create(
            token,
            CreateEventRequest {
                title: "TechFest".to_string(),
                description: "Annual technology festival".to_string(),
                start_date: Utc::now() + Duration::days(10),
                end_date: Utc::now() + Duration::days(12),
                location: "Main Campus".to_string(),
                college_id: college.id,
                images: None,
                max_participants: Some(500),
                is_featured: Some(true),
                coordinators: Some(vec![CoordinatorContact {
                    name: "Asha".to_string(),
                    phone: "9876500000".to_string(),
                }]),
                rules: Some(vec!["Carry your college id".to_string()]),
            },
        )
        .await?;

    Ok(event)
}

/// Sub-event with registrations switched ON and the given offerings
pub async fn seed_sub_event(
    ctx: &TestContext,
    token: &str,
    event_id: i64,
    kind: &str,
    details: Vec<NewSubEventDetail>,
) -> Result<SubEventWithDetails, Box<dyn std::error::Error + Send + Sync>> {
    let sub_event = ctx
        .services
        .sub_events
        .create(
            token,
            CreateSubEventRequest {
                event_id,
                kind: kind.to_string(),
                description: format!("{} arena", kind),
                venue: Some("Hall B".to_string()),
                registration_status: Some("ON".to_string()),
                details,
            },
        )
        .await?;

    Ok(sub_event)
}
