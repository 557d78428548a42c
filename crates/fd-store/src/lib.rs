//! Resource store for decks and favourites.
//!
//! The HTTP layer never talks to a backend directly: it goes through a
//! [`Resource`] scoped to one named collection, which forwards to whatever
//! [`ResourceStore`] the process was started with.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod resource;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use resource::Resource;
pub use store::ResourceStore;

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

/// Collection holding deck metadata, keyed by deck uid.
pub const DECK: &str = "deck";
/// Collection holding the pairs of each deck, keyed by deck uid.
pub const DECK_PAIRS: &str = "deckpairs";
/// Collection holding favourite pairs, keyed by the hash of the pair token.
pub const FAVORITES: &str = "favorites";

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Create the database if it does not exist yet. Call before [`create_pool`].
pub async fn ensure_database(database_url: &str) -> anyhow::Result<()> {
    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
        tracing::info!("created database");
    }

    Ok(())
}

/// Run the migrations in this crate's `migrations/` folder.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run migrations")?;

    Ok(())
}
