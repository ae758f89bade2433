//! Request-scoped cancellation shared with external collaborators.
//!
//! The transport owns cancellation: it hands each request a
//! [`RequestContext`] and may trip the [`CancellationFlag`] or set a deadline.
//! The router checks the context before every collaborator call, and
//! collaborators that block on I/O are expected to poll it as well.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use thiserror::Error;

/// Shared flag used to cancel an in-flight request.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Creates a flag in the "not cancelled" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every context holding a clone of this flag as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancellationFlag::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Cancellation and deadline state for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationFlag,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context that is never cancelled and has no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context observing the supplied cancellation flag.
    #[must_use]
    pub fn with_cancellation(cancellation: CancellationFlag) -> Self {
        Self {
            cancellation,
            deadline: None,
        }
    }

    /// Adds a deadline after which the request counts as cancelled.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Flag shared with the transport.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// Deadline, if one was set.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails fast when the request was cancelled or its deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Cancelled`] or
    /// [`CollaboratorError::DeadlineExceeded`].
    pub fn check(&self) -> Result<(), CollaboratorError> {
        if self.cancellation.is_cancelled() {
            return Err(CollaboratorError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(CollaboratorError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The caller cancelled the request.
    #[error("operation was cancelled")]
    Cancelled,
    /// The request deadline passed.
    #[error("operation exceeded its deadline")]
    DeadlineExceeded,
    /// The collaborator failed for its own reasons.
    #[error("{message}")]
    Failed { message: String },
}

impl CollaboratorError {
    /// Creates a collaborator failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns `true` when the error stems from cancellation or a deadline.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
