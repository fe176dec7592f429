use std::sync::{Arc, Mutex};

use diesel::SqliteConnection;

use crate::{establish_connection, run_migrations, StoreError};

/// Shared handle to the SQLite connection used by async callers.
///
/// Diesel is synchronous, so closures run on tokio's blocking pool while the
/// connection mutex is held.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl Database {
    /// Connects and applies pending migrations.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let mut conn = establish_connection(database_url)?;
        run_migrations(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    pub async fn run<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StoreError::Connection("connection lock poisoned".to_string()))?;
            f(&mut *conn)
        })
        .await
        .map_err(|e| StoreError::Connection(format!("database task failed: {e}")))?
    }
}
