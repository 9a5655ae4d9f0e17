//! Error types for the Poweradmin reconciliation engine
//!
//! Every failure the engine can produce is an [`Error`]. The variants are
//! grouped into the coarse [`ErrorCategory`] taxonomy that drives the host's
//! decisions: drop from state, treat as already satisfied, or propagate.

use crate::resources::ResourceKind;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Local validation failed; no remote call was made
    Validation,
    /// Network failure, timeout, cancellation or an undecodable response
    Transport,
    /// The remote API rejected the request
    RemoteRejection,
    /// The remote API reported that the entity does not exist
    NotFound,
    /// A bulk submission was rejected as a whole
    AtomicBulkFailure,
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input detected before any remote call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The HTTP client gave up waiting for a response
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The caller cancelled the operation while a request was in flight.
    ///
    /// The remote side may or may not have applied the request.
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller-supplied deadline elapsed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Non-2xx status or `success=false` envelope
    #[error("API error (HTTP {status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Message extracted from the envelope
        message: String,
    },

    /// The remote entity does not exist: an HTTP 404, or no match when
    /// filtering a list by name
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bulk request was rejected; none of its operations were applied
    #[error(
        "Bulk operation rejected ({failure_count} failed, {success_count} applied): {}",
        .errors.join("; ")
    )]
    BulkFailure {
        /// Always 0: a rejected batch applies nothing
        success_count: u64,
        /// Failure count reported by the server
        failure_count: u64,
        /// Per-operation error strings, unparsed
        errors: Vec<String>,
    },

    /// The response was well-formed JSON but not what the endpoint promises
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error annotated with the entity it happened to
    #[error("{kind} {identity}: {source}")]
    Operation {
        /// Entity kind
        kind: ResourceKind,
        /// Human-readable identity (id, name or composite key)
        identity: String,
        /// Underlying error
        source: Box<Error>,
    },

    /// A write succeeded remotely but the follow-up read failed, so the
    /// local projection of the entity is unknown.
    #[error("{kind} {identity} was written but could not be read back: {source}")]
    Tainted {
        /// Entity kind
        kind: ResourceKind,
        /// Human-readable identity
        identity: String,
        /// The error of the failed read
        source: Box<Error>,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a remote rejection error
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Annotate this error with the entity it concerns
    pub fn context(self, kind: ResourceKind, identity: impl Into<String>) -> Self {
        Self::Operation {
            kind,
            identity: identity.into(),
            source: Box::new(self),
        }
    }

    /// Mark this read error as having followed a successful write
    pub fn tainted(self, kind: ResourceKind, identity: impl Into<String>) -> Self {
        Self::Tainted {
            kind,
            identity: identity.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with context wrappers removed
    pub fn root(&self) -> &Error {
        match self {
            Self::Operation { source, .. } | Self::Tainted { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Operation { source, .. } | Self::Tainted { source, .. } => source.category(),
            Self::Validation(_) | Self::Config(_) => ErrorCategory::Validation,
            Self::Transport(_)
            | Self::Timeout(_)
            | Self::Cancelled
            | Self::DeadlineExceeded
            | Self::InvalidResponse(_)
            | Self::Json(_)
            | Self::Other(_) => ErrorCategory::Transport,
            Self::Remote { .. } => ErrorCategory::RemoteRejection,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::BulkFailure { .. } => ErrorCategory::AtomicBulkFailure,
        }
    }

    /// True when the remote reported the entity as absent
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// True for caller-initiated cancellation or an elapsed deadline
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Self::Cancelled | Self::DeadlineExceeded)
    }

    /// True when a write was applied but its result could not be read back
    pub fn is_tainted(&self) -> bool {
        match self {
            Self::Tainted { .. } => true,
            Self::Operation { source, .. } => source.is_tainted(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_seen_through_context() {
        let err = Error::not_found("zone 7").context(ResourceKind::Zone, "7");
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("zone 7"));
    }

    #[test]
    fn remote_rejection_is_not_not_found() {
        let err = Error::remote(409, "zone exists");
        assert!(!err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::RemoteRejection);
    }

    #[test]
    fn cancellation_is_a_transport_error() {
        assert!(Error::Cancelled.is_cancelled());
        assert_eq!(Error::Cancelled.category(), ErrorCategory::Transport);
        assert_eq!(Error::DeadlineExceeded.category(), ErrorCategory::Transport);
    }

    #[test]
    fn tainted_survives_context() {
        let err = Error::transport("connection reset")
            .tainted(ResourceKind::RRSet, "1/www/A")
            .context(ResourceKind::RRSet, "1/www/A");
        assert!(err.is_tainted());
        assert_eq!(err.category(), ErrorCategory::Transport);
    }

    #[test]
    fn bulk_failure_lists_errors() {
        let err = Error::BulkFailure {
            success_count: 0,
            failure_count: 1,
            errors: vec!["operation 2: invalid content".to_string()],
        };
        assert_eq!(err.category(), ErrorCategory::AtomicBulkFailure);
        assert!(err.to_string().contains("operation 2: invalid content"));
    }
}
