//! Error types for the BPJS API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the proxy answers unknown
//! participants and bookings with 404, and callers show that differently
//! from a server fault. Every other non-2xx response lands in `HttpError`
//! with the raw status and body. `Transport` covers failures before any
//! response exists (connection refused, DNS, TLS).

use thiserror::Error;

/// Errors returned by `BpjsClient` parse methods and `BpjsApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("transport failed: {0}")]
    Transport(String),
}
