//! Persistence for the topic catalog.
//!
//! The catalog talks to two gateways: a [`DocumentStore`] holding topics,
//! class options, comments and the admin draft, and an [`ObjectStore`] holding
//! uploaded files. Postgres and filesystem backends are used in production,
//! the in-memory ones in tests.

pub mod error;
pub mod local;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

pub use error::{StoreError, StoreResult};
pub use local::LocalObjectStore;
pub use memory::{InMemoryDocumentStore, InMemoryObjectStore};
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, ObjectHandle, ObjectStore};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Ensure the database exists and run migrations in this crate's `migrations/` folder.
pub async fn ensure_db_and_migrate(database_url: &str, pool: &PgPool) -> anyhow::Result<()> {
    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
    }

    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run migrations")?;

    Ok(())
}
