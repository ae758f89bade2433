//! Dispatch for the deprecated `OP_QUERY` opcode.
//!
//! Legacy drivers still send their handshake and, occasionally, their first
//! authentication step as `OP_QUERY` messages addressed to `<db>.$cmd`. This
//! module classifies those requests and routes them:
//!
//! ```text
//! {"isMaster": 1}                                  -> discovery reply
//! {"isMaster": 1, "speculativeAuthenticate": {...}} -> discovery reply
//!                                                     (+ speculativeAuthenticate
//!                                                      when authentication succeeds)
//! {"saslStart": 1, ...}                            -> single-step SASL reply
//! {"<anything else>": ...}                         -> NotImplemented
//! ```
//!
//! Unrecognised commands produce a typed [`DispatchError`] rather than a
//! reply; the transport decides whether to answer in-band with
//! [`error_document`].

mod errors;
mod request;
mod response;
mod router;

pub use self::errors::{DispatchError, ErrorCode};
pub use self::request::{COMMAND_NAMESPACE_SUFFIX, CommandKind, LegacyQuery};
pub use self::response::{Reply, error_document};
pub use self::router::{LegacyQueryRouter, SPECULATIVE_AUTHENTICATE};
pub(crate) use self::router::DISPATCH_TARGET;
