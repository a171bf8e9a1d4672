//! Platform integration tests
//!
//! Everything around the engine: account flows, the admin identity gate,
//! CRUD with the centralized cascade policy, reports and the startup
//! maintenance pass.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use FestBuddy::database::maintenance;
use FestBuddy::models::booking::CreateBookingRequest;
use FestBuddy::models::college::{CreateCollegeRequest, UpdateCollegeRequest};
use FestBuddy::models::event::UpdateEventRequest;
use FestBuddy::models::sponsor::CreateSponsorRequest;
use FestBuddy::models::sub_event::CreateSubEventRequest;
use FestBuddy::models::user::{CreateUserRequest, UpdateUserRequest};
use FestBuddy::services::RegistrationOutcome;
use FestBuddy::FestBuddyError;

use helpers::factories::{offering, seed_event, seed_sub_event, seed_user, USER_PASSWORD};
use helpers::TestContext;

#[tokio::test]
#[serial]
async fn test_user_signup_login_and_duplicate_email() {
    let ctx = TestContext::new().await.expect("context");

    let user = ctx
        .services
        .users
        .signup(CreateUserRequest {
            name: "Priya".to_string(),
            email: "priya@college.edu".to_string(),
            password: USER_PASSWORD.to_string(),
            contact_number: Some("9876543210".to_string()),
        })
        .await
        .expect("signup");

    let logged_in = ctx
        .services
        .users
        .login("priya@college.edu", USER_PASSWORD)
        .await
        .expect("login");
    assert_eq!(logged_in.id, user.id);

    // Wrong password and unknown email collapse to the same error
    let err = ctx.services.users.login("priya@college.edu", "wrong").await.unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidCredentials);
    let err = ctx.services.users.login("nobody@college.edu", USER_PASSWORD).await.unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidCredentials);

    let err = ctx
        .services
        .users
        .signup(CreateUserRequest {
            name: "Impostor".to_string(),
            email: "priya@college.edu".to_string(),
            password: "whatever-else".to_string(),
            contact_number: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::EmailTaken { .. });

    let err = ctx
        .services
        .users
        .signup(CreateUserRequest {
            name: "No Email".to_string(),
            email: "not-an-email".to_string(),
            password: USER_PASSWORD.to_string(),
            contact_number: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidInput(_));

    let all = ctx.services.users.list_users().await.expect("list");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_profile_update_keeps_email_unique() {
    let ctx = TestContext::new().await.expect("context");
    let first = seed_user(&ctx).await.expect("user");
    let second = seed_user(&ctx).await.expect("user");

    let err = ctx
        .services
        .users
        .update_profile(
            second.id,
            UpdateUserRequest {
                name: second.name.clone(),
                email: first.email.clone(),
                contact_number: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::EmailTaken { .. });

    let updated = ctx
        .services
        .users
        .update_profile(
            second.id,
            UpdateUserRequest {
                name: "Renamed".to_string(),
                email: second.email.clone(),
                contact_number: Some("9000000000".to_string()),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.contact_number.as_deref(), Some("9000000000"));
}

#[tokio::test]
#[serial]
async fn test_admin_identity_gates_mutations() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");

    let request = CreateCollegeRequest {
        name: "COEP".to_string(),
        location: "Pune".to_string(),
        description: None,
    };

    // Garbage and missing tokens are refused
    let err = ctx.services.colleges.create("Bearer garbage", request.clone()).await.unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidToken(_));
    let err = ctx.services.colleges.create("", request.clone()).await.unwrap_err();
    assert_matches!(err, FestBuddyError::Authentication(_));

    // A real session passes, with or without the Bearer prefix
    let college = ctx.services.colleges.create(&token, request).await.expect("create");
    let relabeled = format!("Bearer {}", token);
    ctx.services
        .colleges
        .update(
            &relabeled,
            college.id,
            UpdateCollegeRequest {
                name: None,
                location: Some("Shivajinagar".to_string()),
                description: None,
            },
        )
        .await
        .expect("update with Bearer prefix");
}

#[tokio::test]
#[serial]
async fn test_admin_contributions_are_derived_from_creation_stamps() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let other_token = ctx.admin_token().await.expect("second token");

    let event = seed_event(&ctx, &token).await.expect("event");
    let sub_event = seed_sub_event(&ctx, &token, event.id, "Workshop", vec![offering(None, 0, 10)])
        .await
        .expect("sub-event");

    let creator = ctx.services.auth.require_admin(&token).await.expect("creator");
    let bystander = ctx
        .services
        .auth
        .require_admin(&other_token)
        .await
        .expect("bystander");

    let college = ctx.services.colleges.get(event.college_id).await.expect("college");
    assert_eq!(college.created_by, Some(creator.id));
    assert_eq!(sub_event.sub_event.created_by, Some(creator.id));

    let added = ctx.services.admins.contributions(creator.id).await.expect("contributions");
    assert_eq!(added.colleges.len(), 1);
    assert_eq!(added.colleges[0].id, event.college_id);
    assert_eq!(added.events.len(), 1);
    assert_eq!(added.events[0].id, event.id);
    assert_eq!(added.sub_events.len(), 1);
    assert_eq!(added.sub_events[0].id, sub_event.sub_event.id);

    // The other admin added nothing
    let empty = ctx.services.admins.contributions(bystander.id).await.expect("contributions");
    assert!(empty.colleges.is_empty());
    assert!(empty.events.is_empty());
    assert!(empty.sub_events.is_empty());

    let err = ctx.services.admins.contributions(9999).await.unwrap_err();
    assert_matches!(err, FestBuddyError::AdminNotFound { admin_id: 9999 });
}

#[tokio::test]
#[serial]
async fn test_duplicate_admin_registration_is_refused() {
    let ctx = TestContext::new().await.expect("context");

    let request = FestBuddy::models::admin::CreateAdminRequest {
        email: "ops@festbuddy.test".to_string(),
        password: "admin-password".to_string(),
    };
    ctx.services.admins.register(request.clone()).await.expect("register");

    let err = ctx.services.admins.register(request).await.unwrap_err();
    assert_matches!(err, FestBuddyError::AdminExists { .. });
}

#[tokio::test]
#[serial]
async fn test_college_deletion_is_blocked_while_events_exist() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let event = seed_event(&ctx, &token).await.expect("event");

    let err = ctx.services.colleges.delete(&token, event.college_id).await.unwrap_err();
    assert_matches!(err, FestBuddyError::CollegeInUse { .. });

    let hosted = ctx.services.colleges.events(event.college_id).await.expect("hosted");
    assert_eq!(hosted.len(), 1);
    assert_eq!(hosted[0].id, event.id);

    // After the event goes away the college can be removed
    ctx.services.events.delete(&token, event.id).await.expect("delete event");
    ctx.services.colleges.delete(&token, event.college_id).await.expect("delete college");

    let err = ctx.services.colleges.get(event.college_id).await.unwrap_err();
    assert_matches!(err, FestBuddyError::CollegeNotFound { .. });
}

#[tokio::test]
#[serial]
async fn test_event_details_page_is_fully_populated() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let event = seed_event(&ctx, &token).await.expect("event");
    let sub_event = seed_sub_event(
        &ctx,
        &token,
        event.id,
        "Gaming",
        vec![offering(Some("Chess"), 50, 16)],
    )
    .await
    .expect("sub-event");

    ctx.services
        .sponsors
        .create(
            &token,
            CreateSponsorRequest {
                event_id: event.id,
                name: "JetBrains".to_string(),
                kind: Some("Tech".to_string()),
                image: "https://cdn.example.com/jb.png".to_string(),
            },
        )
        .await
        .expect("sponsor");

    let details = ctx.services.events.get_details(event.id).await.expect("details");
    assert_eq!(details.event.id, event.id);
    assert_eq!(details.college.id, event.college_id);
    assert_eq!(details.sub_events.len(), 1);
    assert_eq!(details.sub_events[0].sub_event.id, sub_event.sub_event.id);
    assert_eq!(details.sub_events[0].details.len(), 1);
    assert_eq!(details.sponsors.len(), 1);
    assert_eq!(details.sponsors[0].name, "JetBrains");

    // The sponsor name is mirrored into the event's free-text list
    let refreshed = ctx.services.events.get(event.id).await.expect("event");
    assert_eq!(refreshed.sponsor_names, vec!["JetBrains".to_string()]);

    // Seeded featured, so it shows on the landing-page listing until the
    // admin withdraws it
    let featured = ctx.services.events.list_featured().await.expect("featured");
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, event.id);

    ctx.services
        .events
        .update(
            &token,
            event.id,
            UpdateEventRequest {
                title: None,
                description: None,
                start_date: None,
                end_date: None,
                location: None,
                images: None,
                max_participants: None,
                event_status: None,
                is_featured: Some(false),
                rules: None,
            },
        )
        .await
        .expect("unfeature");
    assert!(ctx.services.events.list_featured().await.expect("featured").is_empty());
}

#[tokio::test]
#[serial]
async fn test_sponsor_removal_cleans_the_event_name_list() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let event = seed_event(&ctx, &token).await.expect("event");

    let sponsor = ctx
        .services
        .sponsors
        .create(
            &token,
            CreateSponsorRequest {
                event_id: event.id,
                name: "RedBull".to_string(),
                kind: None,
                image: "https://cdn.example.com/rb.png".to_string(),
            },
        )
        .await
        .expect("sponsor");

    ctx.services.sponsors.delete(&token, sponsor.id).await.expect("delete");

    let refreshed = ctx.services.events.get(event.id).await.expect("event");
    assert!(refreshed.sponsor_names.is_empty());
    let err = ctx.services.sponsors.get(sponsor.id).await.unwrap_err();
    assert_matches!(err, FestBuddyError::SponsorNotFound { .. });
}

#[tokio::test]
#[serial]
async fn test_sub_event_validation_rejects_bad_offerings() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let event = seed_event(&ctx, &token).await.expect("event");

    // Gaming offering without a title
    let err = ctx
        .services
        .sub_events
        .create(
            &token,
            CreateSubEventRequest {
                event_id: event.id,
                kind: "Gaming".to_string(),
                description: "LAN arena".to_string(),
                venue: Some("Hall C".to_string()),
                registration_status: Some("ON".to_string()),
                details: vec![offering(None, 0, 8)],
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidInput(_));

    // No offerings at all
    let err = ctx
        .services
        .sub_events
        .create(
            &token,
            CreateSubEventRequest {
                event_id: event.id,
                kind: "Workshop".to_string(),
                description: "Empty".to_string(),
                venue: None,
                registration_status: None,
                details: vec![],
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidInput(_));

    // Unknown registration status
    let err = ctx
        .services
        .sub_events
        .create(
            &token,
            CreateSubEventRequest {
                event_id: event.id,
                kind: "Workshop".to_string(),
                description: "Robotics".to_string(),
                venue: None,
                registration_status: Some("MAYBE".to_string()),
                details: vec![offering(None, 0, 8)],
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::InvalidInput(_));

    // Unknown parent event
    let err = ctx
        .services
        .sub_events
        .create(
            &token,
            CreateSubEventRequest {
                event_id: 9999,
                kind: "Workshop".to_string(),
                description: "Orphan".to_string(),
                venue: None,
                registration_status: None,
                details: vec![offering(None, 0, 8)],
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, FestBuddyError::EventNotFound { event_id: 9999 });
}

#[tokio::test]
#[serial]
async fn test_booking_reports_join_the_names() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let user = seed_user(&ctx).await.expect("user");
    let event = seed_event(&ctx, &token).await.expect("event");
    let sub_event = seed_sub_event(&ctx, &token, event.id, "Workshop", vec![offering(None, 0, 10)])
        .await
        .expect("sub-event");

    let outcome = ctx
        .services
        .registration
        .register(CreateBookingRequest {
            event_id: event.id,
            user_id: user.id,
            sub_event_id: sub_event.sub_event.id,
            college: "MIT-WPU".to_string(),
            contact: "9876501234".to_string(),
            additional_info: None,
        })
        .await
        .expect("register");
    let booking = match outcome {
        RegistrationOutcome::Booked(booking) => booking,
        other => panic!("expected Booked, got {:?}", other),
    };

    let reports = ctx.services.registration.list_reports().await.expect("reports");
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.id, booking.id);
    assert_eq!(report.event_title, "TechFest");
    assert_eq!(report.user_email, user.email);
    assert_eq!(report.sub_event_kind.as_deref(), Some("Workshop"));
    assert_eq!(report.college, "MIT-WPU");

    let by_user = ctx
        .services
        .registration
        .reports_for_user(user.id)
        .await
        .expect("user reports");
    assert_eq!(by_user.len(), 1);

    let single = ctx
        .services
        .registration
        .booking_report(booking.id)
        .await
        .expect("single report");
    assert_eq!(single.ticket_number, booking.ticket_number);
}

#[tokio::test]
#[serial]
async fn test_account_deletion_releases_held_slots() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let user = seed_user(&ctx).await.expect("user");
    let event = seed_event(&ctx, &token).await.expect("event");
    let sub_event = seed_sub_event(&ctx, &token, event.id, "Workshop", vec![offering(None, 0, 3)])
        .await
        .expect("sub-event");

    ctx.services
        .registration
        .register(CreateBookingRequest {
            event_id: event.id,
            user_id: user.id,
            sub_event_id: sub_event.sub_event.id,
            college: "SPPU".to_string(),
            contact: "9876512345".to_string(),
            additional_info: None,
        })
        .await
        .expect("register");
    assert_eq!(
        ctx.database.detail_counter(sub_event.details[0].id).await.expect("counter"),
        1
    );

    ctx.services.users.delete_account(user.id).await.expect("delete account");

    assert_eq!(
        ctx.database.detail_counter(sub_event.details[0].id).await.expect("counter"),
        0
    );
    assert_eq!(ctx.database.booking_count().await.expect("count"), 0);
    let err = ctx.services.users.get_user(user.id).await.unwrap_err();
    assert_matches!(err, FestBuddyError::UserNotFound { .. });
}

#[tokio::test]
#[serial]
async fn test_event_deletion_cascades_to_children() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let user = seed_user(&ctx).await.expect("user");
    let event = seed_event(&ctx, &token).await.expect("event");
    let sub_event = seed_sub_event(&ctx, &token, event.id, "Workshop", vec![offering(None, 0, 10)])
        .await
        .expect("sub-event");

    ctx.services
        .sponsors
        .create(
            &token,
            CreateSponsorRequest {
                event_id: event.id,
                name: "LocalCafe".to_string(),
                kind: None,
                image: "https://cdn.example.com/lc.png".to_string(),
            },
        )
        .await
        .expect("sponsor");
    ctx.services
        .registration
        .register(CreateBookingRequest {
            event_id: event.id,
            user_id: user.id,
            sub_event_id: sub_event.sub_event.id,
            college: "DY Patil".to_string(),
            contact: "9876523456".to_string(),
            additional_info: None,
        })
        .await
        .expect("register");

    ctx.services.events.delete(&token, event.id).await.expect("delete event");

    assert_eq!(ctx.database.booking_count().await.expect("count"), 0);
    let err = ctx.services.sub_events.get(sub_event.sub_event.id).await.unwrap_err();
    assert_matches!(err, FestBuddyError::SubEventNotFound { .. });
    assert!(ctx.services.sponsors.list().await.expect("sponsors").is_empty());
}

#[tokio::test]
#[serial]
async fn test_venue_backfill_repairs_legacy_rows() {
    let ctx = TestContext::new().await.expect("context");
    let token = ctx.admin_token().await.expect("token");
    let event = seed_event(&ctx, &token).await.expect("event");

    // A legacy row created before venues existed
    sqlx::query(
        "INSERT INTO sub_events (event_id, kind, description, venue, registration_status) \
         VALUES ($1, 'Workshop', 'legacy row', NULL, 'OFF')",
    )
    .bind(event.id)
    .execute(&ctx.database.pool)
    .await
    .expect("insert legacy row");

    let repaired = maintenance::backfill_missing_venues(&ctx.database.pool)
        .await
        .expect("backfill");
    assert_eq!(repaired, 1);

    let venues: Vec<(Option<String>,)> =
        sqlx::query_as("SELECT venue FROM sub_events WHERE event_id = $1")
            .bind(event.id)
            .fetch_all(&ctx.database.pool)
            .await
            .expect("venues");
    assert!(venues
        .iter()
        .all(|(v,)| v.as_deref() == Some(maintenance::DEFAULT_VENUE)));

    // Idempotent: nothing left to repair
    let repaired = maintenance::backfill_missing_venues(&ctx.database.pool)
        .await
        .expect("backfill again");
    assert_eq!(repaired, 0);
}
