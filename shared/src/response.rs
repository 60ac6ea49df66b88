//! API response envelope
//!
//! Mutating endpoints answer with this structure:
//!
//! ```json
//! {
//!     "status": "success",
//!     "message": "Delivery created successfully.",
//!     "data": { ... }
//! }
//! ```
//!
//! List endpoints wrap their payload in `data` without a message; errors
//! carry `status = "error"` and no data.

use serde::{Deserialize, Serialize};

/// Status string for successful responses
pub const STATUS_SUCCESS: &str = "success";
/// Status string for failed responses
pub const STATUS_ERROR: &str = "error";

/// Unified API response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// "success" | "error"
    pub status: String,
    /// Human-readable message (always present on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload (absent on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with payload and message
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Successful response with payload only
    pub fn ok_data(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: None,
            data: Some(data),
        }
    }

    /// Successful response without payload
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    /// Error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::<()>::error("Product 42 not found")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "error", "message": "Product 42 not found"})
        );
    }

    #[test]
    fn data_only_envelope_omits_message() {
        let value = serde_json::to_value(ApiResponse::ok_data(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({"status": "success", "data": [1, 2]}));
    }
}
