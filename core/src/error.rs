//! Error types for the COVID dailies client and aggregation.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. `Transport` covers the cases where no
//! response arrived at all.

/// Errors produced while building, executing, or parsing a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors that abort an aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// A record's region or country name is absent or not coercible to text.
    #[error("record #{index} (id {id}) has no usable country name")]
    MissingCountry { index: usize, id: i64 },

    /// A per-country total no longer fits in a `u64`.
    #[error("{field} total for {country} overflowed")]
    Overflow {
        country: String,
        field: &'static str,
    },
}
