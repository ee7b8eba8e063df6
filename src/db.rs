use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Database file name inside a store directory.
pub const STORE_DB_FILE: &str = "index.sqlite3";

/// Open the SQLite pool for the given store directory, creating the
/// database file on first open.
pub async fn connect(store_dir: &Path) -> Result<SqlitePool> {
    std::fs::create_dir_all(store_dir)?;
    let db_path = store_dir.join(STORE_DB_FILE);

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}
