//! Error types for airlinks.
//!
//! Every fallible operation in the workspace returns `AirlinksError`. Errors are
//! surfaced to the caller unchanged: nothing here retries or swallows a failure.

use thiserror::Error;

/// Result type alias using `AirlinksError`.
pub type Result<T> = std::result::Result<T, AirlinksError>;

/// Main error type for all airlinks operations.
#[derive(Debug, Error)]
pub enum AirlinksError {
    // ═══════════════════════════════════════════════════════════════════════════
    // IDENTIFIER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input does not match the expected identifier format. Never reaches the network.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLUTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The list resolved but declares no link records.
    #[error("List '{0}' has no links")]
    EmptyList(String),

    /// The lists lookup returned no retrievable fields.
    #[error("List not found: {0}")]
    NotFound(String),

    /// A filtered links query matched zero records.
    #[error("Query matched no records in table {0}")]
    EmptyResult(String),

    /// The list declares links but none of them resolve to real records.
    #[error("No links found for list '{0}'")]
    NoLinksFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Network, HTTP status or response parsing failure.
    #[error("Transport error: {0}")]
    Transport(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Missing or malformed settings.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AirlinksError {
    /// Returns true if retrying the same call may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AirlinksError::Transport(_))
    }

    /// Returns true if the error was raised before any remote call.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            AirlinksError::InvalidIdentifier(_) | AirlinksError::Config(_)
        )
    }

    /// Short notice text for a user-facing surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            AirlinksError::InvalidIdentifier(_) => "Invalid List ID",
            AirlinksError::EmptyList(_) => "List has no links",
            AirlinksError::NotFound(_) => "List not found",
            AirlinksError::EmptyResult(_) | AirlinksError::NoLinksFound(_) => "No links found",
            AirlinksError::Transport(_) => "Could not reach Airtable",
            AirlinksError::Json(_) => "Unexpected response from Airtable",
            AirlinksError::Io(_) => "Could not access settings",
            AirlinksError::Config(_) => "Airtable settings are incomplete",
        }
    }
}
