//! SASL start continuation used by the legacy handshake.
//!
//! Clients begin authentication with `saslStart`, either as a standalone
//! command on `<db>.$cmd` or embedded in `isMaster` as
//! `speculativeAuthenticate`. Multi-round mechanisms live behind
//! [`AuthContinuation`]; [`SingleStepSaslStart`] answers mechanisms that finish
//! in one step.

use std::sync::Arc;

use docshim_document::{Binary, Document};

use crate::context::{CollaboratorError, RequestContext};

/// First step of a SASL conversation.
pub trait AuthContinuation: Send + Sync {
    /// Starts a conversation against the `db` authentication database.
    ///
    /// `arguments` is the client's `saslStart` (or `speculativeAuthenticate`)
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when authentication fails or the request
    /// was cancelled.
    fn sasl_start(
        &self,
        context: &RequestContext,
        db: &str,
        arguments: &Document,
    ) -> Result<Document, CollaboratorError>;
}

impl<T> AuthContinuation for Arc<T>
where
    T: AuthContinuation + ?Sized,
{
    fn sasl_start(
        &self,
        context: &RequestContext,
        db: &str,
        arguments: &Document,
    ) -> Result<Document, CollaboratorError> {
        (**self).sasl_start(context, db, arguments)
    }
}

/// Reply to a `saslStart` that completes immediately.
///
/// `{conversationId: 1, done: true, payload: <empty>, ok: 1}`
#[must_use]
pub fn completed_exchange() -> Document {
    Document::new()
        .with("conversationId", 1_i32)
        .with("done", true)
        .with("payload", Binary::empty())
        .with("ok", 1.0_f64)
}

/// Continuation for single-step mechanisms.
///
/// Performs no validation and always reports a finished exchange. Replace it
/// once a mechanism needs a challenge round trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleStepSaslStart;

impl AuthContinuation for SingleStepSaslStart {
    fn sasl_start(
        &self,
        context: &RequestContext,
        _db: &str,
        _arguments: &Document,
    ) -> Result<Document, CollaboratorError> {
        context.check()?;
        Ok(completed_exchange())
    }
}
