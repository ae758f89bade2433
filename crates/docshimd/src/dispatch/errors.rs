//! Error types for legacy query dispatch.
//!
//! Only three outcomes escape the router as errors: an unrecognised command,
//! a failed discovery builder, and cancellation. Speculative authentication
//! problems never surface here; the router degrades to a plain discovery reply
//! instead.

use thiserror::Error;

use crate::context::CollaboratorError;

/// Wire error codes reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unexpected server-side failure.
    InternalError,
    /// The operation was interrupted before completing.
    Interrupted,
    /// The command is not supported over the legacy opcode.
    NotImplemented,
}

impl ErrorCode {
    /// Numeric code carried in error replies.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::InternalError => 1,
            Self::Interrupted => 11601,
            Self::NotImplemented => 238,
        }
    }

    /// Symbolic name carried in error replies as `codeName`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::InternalError => "InternalError",
            Self::Interrupted => "Interrupted",
            Self::NotImplemented => "NotImplemented",
        }
    }
}

/// Errors surfaced while dispatching a legacy query.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler exists for the command and namespace.
    #[error("CmdQuery: unhandled command \"{command}\" for collection \"{namespace}\"")]
    NotImplemented { command: String, namespace: String },

    /// The topology-discovery builder failed.
    #[error("topology discovery failed: {source}")]
    Discovery {
        #[source]
        source: CollaboratorError,
    },

    /// The request was cancelled or ran past its deadline.
    #[error("request aborted: {source}")]
    Cancelled {
        #[source]
        source: CollaboratorError,
    },
}

impl DispatchError {
    /// Creates a not-implemented error for `command` on `namespace`.
    pub fn not_implemented(command: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::NotImplemented {
            command: command.into(),
            namespace: namespace.into(),
        }
    }

    /// Wraps a discovery builder failure.
    ///
    /// Cancellation reported by the builder becomes [`DispatchError::Cancelled`].
    pub fn discovery(source: CollaboratorError) -> Self {
        if source.is_cancellation() {
            Self::Cancelled { source }
        } else {
            Self::Discovery { source }
        }
    }

    /// Creates a cancellation error.
    pub fn cancelled(source: CollaboratorError) -> Self {
        Self::Cancelled { source }
    }

    /// Wire error code for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotImplemented { .. } => ErrorCode::NotImplemented,
            Self::Discovery { .. } => ErrorCode::InternalError,
            Self::Cancelled { .. } => ErrorCode::Interrupted,
        }
    }

    /// Short diagnostic argument naming the offending opcode and command.
    #[must_use]
    pub fn argument(&self) -> Option<String> {
        match self {
            Self::NotImplemented { command, .. } => Some(format!("OpQuery: {command}")),
            Self::Discovery { .. } | Self::Cancelled { .. } => None,
        }
    }

    /// Returns `true` when no reply should be written for this request.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
