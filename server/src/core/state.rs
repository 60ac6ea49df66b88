//! Server state
//!
//! [`ServerState`] holds the shared handles every handler needs: the
//! configuration and the SQLite pool. Cloning is shallow.

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Initialize the server state:
    /// 1. ensure the working directory layout exists
    /// 2. open the database (runs migrations)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db = DbService::new(&config.database_path()).await?;
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
