//! EventDesk event management core
//!
//! Main application entry point: load configuration, initialize logging,
//! open the store, and bring the schema up to date.

use tracing::info;

use EventDesk::config::Settings;
use EventDesk::database::{connection, DatabaseService};
use EventDesk::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventDesk::info());

    // Initialize database connection
    info!("Opening event store...");
    let db_config = connection::DatabaseConfig {
        path: settings.database.path.clone().into(),
        max_connections: settings.database.max_connections,
        busy_timeout: std::time::Duration::from_secs(settings.database.busy_timeout_seconds),
        create_if_missing: settings.database.create_if_missing,
    };
    let pool = connection::create_pool(&db_config).await?;
    connection::init_schema(&pool).await?;

    let database = DatabaseService::new(pool.clone());
    let event_count = database.events.count().await?;

    connection::health_check(&pool).await?;
    info!(events = event_count, "EventDesk store ready");

    Ok(())
}
