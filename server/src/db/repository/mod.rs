//! Repository module
//!
//! CRUD and stock-adjustment operations, one module per entity. All
//! functions are free async functions over `&SqlitePool` (or a
//! `&mut SqliteConnection` when they must compose inside a caller's
//! transaction).

pub mod delivery;
pub mod product;
pub mod recipe;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
