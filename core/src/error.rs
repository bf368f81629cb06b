//! Error types for the car movies API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because updating or deleting a record
//! that someone else removed is the common failure. All other unexpected
//! statuses land in `HttpError`. Both keep the raw response body, which is
//! what the console shows the user.

/// Errors returned by `MovieClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 for the requested movie.
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// The server returned a status other than the one the operation expects.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// Text to surface to the user: the raw server body for status errors,
    /// the error description otherwise.
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound { body } | ApiError::HttpError { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}
