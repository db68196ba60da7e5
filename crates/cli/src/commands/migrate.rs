//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bo-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` (fallback `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Admin migrations: `crates/admin/migrations/`

use backoffice_admin::config::StorageConfig;
use backoffice_admin::db;

use super::CliError;

/// Run admin database migrations.
pub async fn run() -> Result<(), CliError> {
    let config = StorageConfig::from_env()?;
    let database_url = config.database_url()?;

    tracing::info!("Connecting to admin database...");
    let pool = db::create_pool(database_url).await?;

    tracing::info!("Running admin migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
