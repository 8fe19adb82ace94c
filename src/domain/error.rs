//! Domain error types for gerrit-trigger.
//!
//! These errors stem from user-supplied configuration or from malformed
//! input events. None of them are transient, so callers should surface the
//! message to whoever edits the configuration rather than retry.

use thiserror::Error;

/// Errors raised while matching an event against a trigger configuration.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid comment pattern `{pattern}`: {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors related to configured Gerrit servers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server not found: {0}")]
    NotFound(String),
}

/// Errors raised while decoding Gerrit stream events.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event has no `type` field")]
    MissingType,

    #[error("Unknown event type: {0}")]
    UnknownType(String),

    #[error("Malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}
