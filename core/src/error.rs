//! Error types for the employee API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Transport` with the raw
//! status code and diagnostic body.
//!
//! A 2xx response whose envelope carries `success: false` is NOT an error at
//! this layer: the envelope is returned intact so the form controller can
//! surface the server's message and keep the user's input for a retry.

use thiserror::Error;

/// Errors returned by `EmployeeClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested employee does not exist.
    #[error("employee not found")]
    NotFound,

    /// The server returned a non-2xx status; `body` is diagnostic text.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("response parsing failed: {0}")]
    Parse(String),

    /// The request payload could not be encoded.
    #[error("payload encoding failed: {0}")]
    Encode(String),
}
