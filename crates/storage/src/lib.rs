//! Persistence layer for the campus event registration service.
//!
//! Events and registrations live in two independent SQLite databases. Each
//! store has its own pool, its own migration set and its own lifetime; no
//! query ever joins across them.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;

use error::Result;

static EVENTS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/events");
static REGISTRATIONS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/registrations");

/// Handles to both stores. Cloning is cheap; clones share the pools.
#[derive(Debug, Clone)]
pub struct Database {
    events: SqlitePool,
    registrations: SqlitePool,
}

impl Database {
    /// Open (creating if absent) the events and registrations databases.
    pub async fn connect(events_url: &str, registrations_url: &str) -> Result<Self> {
        let events = open_file_pool(events_url).await?;
        let registrations = open_file_pool(registrations_url).await?;

        Ok(Self {
            events,
            registrations,
        })
    }

    /// Two private in-memory stores, used by tests.
    ///
    /// An in-memory SQLite database lives only as long as its connection, so
    /// each pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let events = open_memory_pool().await?;
        let registrations = open_memory_pool().await?;

        Ok(Self {
            events,
            registrations,
        })
    }

    pub fn events_pool(&self) -> &SqlitePool {
        &self.events
    }

    pub fn registrations_pool(&self) -> &SqlitePool {
        &self.registrations
    }

    /// Create both schemas. Already-applied migrations are skipped, so this
    /// runs on every startup.
    pub async fn run_migrations(&self) -> Result<()> {
        EVENTS_MIGRATOR.run(&self.events).await?;
        tracing::debug!("events schema is up to date");

        REGISTRATIONS_MIGRATOR.run(&self.registrations).await?;
        tracing::debug!("registrations schema is up to date");

        Ok(())
    }

    /// Close both pools, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.events.close().await;
        self.registrations.close().await;
    }
}

async fn open_file_pool(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

async fn open_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}
