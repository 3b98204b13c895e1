//! Error types for the glin-gateway library.
//!
//! This module defines all error types that can occur while creating a
//! remittance and recording its result on an order.

use thiserror::Error;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum GlinError {
    /// Transport-level error (DNS, connection, timeout) from the HTTP client
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote API answered with a non-200 status.
    ///
    /// The response body is preserved for internal logging; it is never
    /// surfaced to the shopper.
    #[error("Glin API error: status {status}")]
    Api {
        /// HTTP status code returned by the remote API
        status: u16,
        /// Raw response body, kept for logs
        body: String,
    },

    /// A 200 response whose body is missing the expected remittance fields
    #[error("Invalid remittance response: {0}")]
    InvalidResponse(String),

    /// The order identifier could not be resolved by the host platform
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The host platform failed to persist the order mutation
    #[error("Order storage error: {0}")]
    Storage(String),

    /// Invalid or missing merchant configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GlinError>;
