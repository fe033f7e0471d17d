//! Cinelog persistence layer.
//!
//! Exposes the [`store::EntryStore`] contract with its Postgres and
//! in-memory adapters, plus [`service::EntryService`], which layers input
//! clamping and error classification on top of a store.

pub mod service;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use service::EntryService;
pub use store::{EntryStore, MemoryEntryStore, PgEntryStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round trip.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
