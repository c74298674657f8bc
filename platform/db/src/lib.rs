//! Database primitives: connection settings, pool wiring and the employee store.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use thiserror::Error;
use tracing::debug;

mod employees;

pub use employees::{EmployeeChanges, EmployeeStore, NewEmployee};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: "DATABASE_URL".to_string(),
            max_connections: None,
        }
    }
}

impl DatabaseSettings {
    /// `DATABASE_URL` plus an optional `DATABASE_MAX_CONNECTIONS` cap.
    pub fn from_env() -> Self {
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok());
        Self {
            max_connections,
            ..Self::default()
        }
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(DbError::MissingUrl)
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    connect_url(settings.database_url()?, settings.max_connections).await
}

/// Open a pool for an explicit URL, bypassing the environment.
pub async fn connect_url(url: impl Into<String>, max_connections: Option<u32>) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(url.into());
    if let Some(max) = max_connections {
        options.max_connections(max);
    }
    options.sqlx_logging(false);
    let pool = Database::connect(options).await?;
    debug!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}

/// Round-trip a trivial statement; used by the health probe.
pub async fn ping(pool: &DbPool) -> bool {
    pool.execute(Statement::from_string(
        pool.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await
    .is_ok()
}
