//! FestBuddy operational entry point
//!
//! Boots the stack: configuration, logging, database pool, migrations,
//! startup maintenance, health check. The service layer is the crate's
//! public interface; this binary prepares a deployment and reports state.

use tracing::info;

use FestBuddy::{
    config::Settings,
    database::{self, connection, maintenance, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the process
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", FestBuddy::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from(&settings.database);
    let pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    database::run_migrations(&pool).await?;

    // Startup maintenance: repair records predating the venue field
    if settings.features.venue_backfill_on_startup {
        maintenance::backfill_missing_venues(&pool).await?;
    }

    // Wire services; a bad payment configuration fails here, not mid-request
    let _services = ServiceFactory::new(pool.clone(), &settings)?;

    // Final health check and state report
    database::health_check(&pool).await?;
    let db = DatabaseService::new(pool);
    let stats = db.get_system_stats().await?;
    info!(stats = %stats, "FestBuddy is ready");

    Ok(())
}
