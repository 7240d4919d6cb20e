//! Schema initialization for the `students` table.

use sqlx::sqlite::SqlitePool;
use tracing::{error, info};

/// Create the `students` table if it does not exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    Ok(())
}

/// Startup wrapper around [`init_schema`].
///
/// A failure is logged and swallowed: an existing deployment may already
/// have the table, and requests report connection problems on their own.
pub async fn init_schema_or_log(pool: &SqlitePool) -> bool {
    match init_schema(pool).await {
        Ok(()) => {
            info!("Database initialized successfully");
            true
        }
        Err(e) => {
            error!(error = %e, "Error initializing database");
            false
        }
    }
}
