use crate::{entity::Entity, record::DbDataError, registry::CustomerRegistry, store::Store};
use sqlx::{
    Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("No row with id {id} exists in table {table}.")]
    RowNotFound { table: &'static str, id: i64 },
    #[error(transparent)]
    Data(#[from] DbDataError),
    #[error("Database migration failed: {0}")]
    Migrate(#[from] MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool and hands out stores and transactions on it.
#[derive(Clone, Debug)]
pub struct DbClient {
    pool: SqlitePool,
}

impl DbClient {
    /// Opens a pool on `url`, creating the database file if it does not exist yet.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!(url, max_connections, "Connected to database");
        Ok(Self::from_pool(pool))
    }

    /// A private in-memory database.
    ///
    /// The pool is limited to a single connection that is never recycled,
    /// since every SQLite memory connection sees its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self::from_pool(pool))
    }

    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Starts a transaction. Dropping it without committing rolls it back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    #[must_use]
    pub fn store<T: Entity>(&self) -> Store<T> {
        Store::new(self.pool.clone())
    }

    #[must_use]
    pub fn registry(&self) -> CustomerRegistry {
        CustomerRegistry::new(self.clone())
    }
}
