//! Shared types for the Matrium backend
//!
//! Domain models, the API response envelope and small utility helpers used
//! by the server crate and its tests.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
