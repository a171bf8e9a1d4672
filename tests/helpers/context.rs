//! Unified test context
//!
//! Wires settings, the test database and the mock gateway into a full
//! `ServiceFactory`, the way `main` does against real infrastructure.

use FestBuddy::config::Settings;
use FestBuddy::database::DatabaseService;
use FestBuddy::models::admin::CreateAdminRequest;
use FestBuddy::services::ServiceFactory;

use super::database::TestDatabase;
use super::gateway::{PaymentGatewayMock, TEST_KEY_SECRET};

pub struct TestContext {
    pub database: TestDatabase,
    pub gateway: PaymentGatewayMock,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub db: DatabaseService,
}

impl TestContext {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::with_settings(|_| {}).await
    }

    /// Build a context after letting the caller tweak the settings
    pub async fn with_settings(
        adjust: impl FnOnce(&mut Settings),
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database = TestDatabase::new().await?;
        database.reset().await?;
        let gateway = PaymentGatewayMock::new().await;

        let mut settings = Settings::default();
        settings.database.url = database.database_url.clone();
        settings.auth.secret_key = "festbuddy-test-auth-secret".to_string();
        settings.payment.api_url = gateway.uri();
        settings.payment.key_id = "rzp_test_key".to_string();
        settings.payment.key_secret = TEST_KEY_SECRET.to_string();
        settings.payment.timeout_seconds = 2;
        adjust(&mut settings);

        let services = ServiceFactory::new(database.pool.clone(), &settings)?;
        let db = DatabaseService::new(database.pool.clone());

        Ok(Self {
            database,
            gateway,
            settings,
            services,
            db,
        })
    }

    /// Register an admin and log in, returning a usable bearer token
    pub async fn admin_token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let email = format!("admin-{}@festbuddy.test", uuid::Uuid::new_v4());
        let password = "correct-horse-battery";

        self.services
            .admins
            .register(CreateAdminRequest {
                email: email.clone(),
                password: password.to_string(),
            })
            .await?;

        let session = self.services.admins.login(&email, password).await?;
        Ok(session.token)
    }
}
