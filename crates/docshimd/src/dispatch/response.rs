//! Reply values produced by the dispatcher.
//!
//! A [`Reply`] holds exactly one document. Framing (`OP_REPLY` flags, cursor
//! identifiers, response-to identifiers) belongs to the transport. Failures
//! can be rendered in-band with [`error_document`].

use docshim_document::Document;

use super::errors::DispatchError;

/// The single document answering a legacy query.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    document: Document,
}

impl Reply {
    /// Wraps a reply document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Borrows the reply document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the reply, returning its document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Renders a dispatch failure as a command error document.
///
/// Returns `None` for cancellation: the caller tears down the request instead
/// of answering it.
#[must_use]
pub fn error_document(error: &DispatchError) -> Option<Document> {
    if error.is_cancellation() {
        return None;
    }
    let code = error.code();
    Some(
        Document::new()
            .with("ok", 0.0_f64)
            .with("errmsg", error.to_string())
            .with("code", code.code())
            .with("codeName", code.name()),
    )
}
