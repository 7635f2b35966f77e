//! SQLite pool with split reader/writer connections.
//!
//! SQLite serializes writers, so the pool keeps a single-connection writer
//! for mutations and a small multi-connection reader pool for queries. WAL
//! journal mode lets reads proceed while a write is in progress.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Split read/write SQLite pool in WAL mode.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the database and build both pools.
    ///
    /// The writer holds exactly one connection and runs migrations before
    /// the reader pool opens; readers are read-only and capped at 8
    /// connections. Both sides use WAL mode and a 5-second busy timeout.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(opts.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }
}
