//! PlanZen Storage
//!
//! `SQLite` document store for PlanZen.
//!
//! # Architecture
//!
//! - **Users**: a typed `users` table with a unique, lower-cased email
//! - **Documents**: one `documents` table holding every record kind as JSON,
//!   partitioned by collection and scoped to an owner
//! - **Vertical Slicing**: each slice (`users`, `documents`) owns its queries
//!
//! # Example
//!
//! ```rust,no_run
//! use planzen_core::{Storage, UserId};
//! use planzen_core::types::Todo;
//! use planzen_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://planzen.db").await?;
//!
//! let todos = db.list_documents::<Todo>(&UserId::new("user-1")).await?;
//! # Ok(())
//! # }
//! ```

mod columns;
mod database;
mod error;

// Vertical slices
pub mod documents;
pub mod users;

pub use database::Database;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://planzen.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
