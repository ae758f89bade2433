//! Legacy `OP_QUERY` compatibility shim.
//!
//! Older document-database drivers still open every connection with an
//! `isMaster` handshake sent over the deprecated `OP_QUERY` opcode, and some
//! send `saslStart` the same way. This crate accepts those decoded requests
//! and routes them:
//!
//! - the handshake goes to a [`TopologyDiscovery`] collaborator;
//! - a handshake carrying `speculativeAuthenticate` also runs the first
//!   authentication step through an [`AuthContinuation`] and merges the
//!   outcome into the handshake reply, saving the client a round trip;
//! - `saslStart` on `<db>.$cmd` is answered by a single-step stub;
//! - anything else fails with [`DispatchError::NotImplemented`].
//!
//! Wire framing, the discovery reply contents, and the real authentication
//! mechanisms live outside this crate. [`bootstrap_with`] wires configuration,
//! telemetry, and the collaborators into a ready [`Shim`].

pub mod auth;
mod bootstrap;
pub mod context;
pub mod dispatch;
pub mod handshake;
mod telemetry;

pub use auth::{AuthContinuation, SingleStepSaslStart, completed_exchange};
pub use bootstrap::{BootstrapError, ConfigLoader, Shim, SystemConfigLoader, bootstrap_with};
pub use context::{CancellationFlag, CollaboratorError, RequestContext};
pub use dispatch::{
    DispatchError, ErrorCode, LegacyQuery, LegacyQueryRouter, Reply, SPECULATIVE_AUTHENTICATE,
};
pub use handshake::{ServerIdentity, TopologyDiscovery};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
