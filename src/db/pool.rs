//! Connection pool construction.

use crate::config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, warn};

/// Build the SQLite pool described by `config`.
///
/// The pool connects lazily, so an unreachable database does not fail here;
/// it surfaces later as a connection failure when a request checks a
/// connection out. Only an unparseable URL is an error.
pub fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    if let Some(path) = config.database.file_path() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!(dir = %parent.display(), error = %e, "Failed to create database directory");
                }
            }
        }
    }

    let options =
        SqliteConnectOptions::from_str(&config.database.connection_url())?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect_lazy_with(options);

    Ok(pool)
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // journal_mode returns the mode actually applied
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.try_get(0)?;
    debug!(journal_mode = %journal_mode, "Configured SQLite connection");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
