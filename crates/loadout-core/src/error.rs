//! Error types for decode and calibration operations.

use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Decode error types.
#[derive(Debug, Error)]
pub enum Error {
    /// The encoded text is not a valid build string.
    ///
    /// Raised when a character falls outside the base64 alphabet or the
    /// string is structurally undecodable. Never raised for inputs that are
    /// merely shorter than the schema expects; short bitstreams decode to
    /// mostly-empty selection tables instead.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// No schema is registered for the requested class/spec pair.
    #[error("no schema for class '{class}', spec '{spec}'")]
    SchemaNotFound { class: String, spec: String },

    /// Calibration exhausted its configuration space without a viable hit.
    ///
    /// Either every candidate failed to decode the reference string, or no
    /// candidate scored above the trivial baseline.
    #[error("no viable decoder configuration found")]
    NoViableConfiguration,
}

impl Error {
    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a schema-not-found error.
    pub fn schema_not_found(class: impl Into<String>, spec: impl Into<String>) -> Self {
        Error::SchemaNotFound {
            class: class.into(),
            spec: spec.into(),
        }
    }

    /// Get error category for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::MalformedInput { .. } => "malformed_input",
            Error::SchemaNotFound { .. } => "schema_not_found",
            Error::NoViableConfiguration => "no_viable_configuration",
        }
    }
}
