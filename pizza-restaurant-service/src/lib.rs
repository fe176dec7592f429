use std::env;

use diesel::{connection::SimpleConnection, prelude::*};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;

pub mod database;
pub mod error;
pub mod models;
pub mod schema;
pub mod seed;
pub mod store;

pub use database::Database;
pub use error::{Entity, StoreError, ValidationError};
pub use store::RestaurantStore;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const DEFAULT_DATABASE_URL: &str = "app.db";

pub fn database_url() -> String {
    dotenv().ok();

    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, StoreError> {
    let mut conn = SqliteConnection::establish(database_url)?;
    // SQLite leaves foreign keys unchecked unless asked, per connection.
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Connection(format!("Failed to run migrations: {e}")))?;
    for version in applied {
        tracing::info!(%version, "applied migration");
    }
    Ok(())
}
