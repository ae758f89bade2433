//! Command routing for legacy `OP_QUERY` requests.
//!
//! Routing happens in this order:
//!
//! 1. `isMaster`/`ismaster` carrying a non-null `speculativeAuthenticate`
//!    field takes the speculative authentication fast path, whatever the
//!    namespace.
//! 2. `isMaster`/`ismaster` on a `$cmd` namespace returns the discovery reply.
//! 3. `saslStart` on a `$cmd` namespace returns the single-step exchange.
//! 4. Everything else is rejected as not implemented.
//!
//! On the fast path the discovery reply is always built first. The
//! `speculativeAuthenticate` reply field is present only when the continuation
//! succeeded, so a failed attempt looks exactly like one that never happened
//! and the client falls back to the regular `saslStart` sequence.

use docshim_document::{Document, Value};
use tracing::debug;

use crate::auth::{self, AuthContinuation};
use crate::context::RequestContext;
use crate::handshake::{ServerIdentity, TopologyDiscovery};

use super::errors::DispatchError;
use super::request::{CommandKind, LegacyQuery};
use super::response::Reply;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Handshake field carrying an embedded `saslStart`.
pub const SPECULATIVE_AUTHENTICATE: &str = "speculativeAuthenticate";

/// Field of the embedded `saslStart` naming the authentication database.
const AUTH_DATABASE_FIELD: &str = "db";

/// Routes legacy queries to the discovery builder, the SASL continuation, or a
/// not-implemented failure.
///
/// The router holds no per-request state and can be shared between threads
/// when its collaborators allow it.
#[derive(Debug)]
pub struct LegacyQueryRouter<D, A> {
    identity: ServerIdentity,
    discovery: D,
    authenticator: A,
}

impl<D, A> LegacyQueryRouter<D, A>
where
    D: TopologyDiscovery,
    A: AuthContinuation,
{
    /// Creates a router reporting `identity` during discovery.
    pub fn new(identity: ServerIdentity, discovery: D, authenticator: A) -> Self {
        Self {
            identity,
            discovery,
            authenticator,
        }
    }

    /// Server identity passed to the discovery builder.
    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Routes a legacy query to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotImplemented`] for unrecognised commands,
    /// [`DispatchError::Discovery`] when the discovery builder fails, and
    /// [`DispatchError::Cancelled`] when the request is cancelled.
    pub fn route(
        &self,
        context: &RequestContext,
        query: &LegacyQuery,
    ) -> Result<Reply, DispatchError> {
        let command = query.command();

        debug!(
            target: DISPATCH_TARGET,
            command = query.command_name(),
            recognised_as = command.as_str(),
            database = query.database(),
            namespace = query.full_collection_name(),
            "routing legacy query"
        );

        if command == CommandKind::IsMaster && speculative_request(query.query()).is_some() {
            return self.discover_with_speculative_auth(context, query);
        }

        if !query.is_command_namespace() {
            return Err(not_implemented(query));
        }

        match command {
            CommandKind::IsMaster => self.discover(context, query).map(Reply::new),
            CommandKind::SaslStart => Ok(Reply::new(auth::completed_exchange())),
            CommandKind::Other => Err(not_implemented(query)),
        }
    }

    fn discover(
        &self,
        context: &RequestContext,
        query: &LegacyQuery,
    ) -> Result<Document, DispatchError> {
        context.check().map_err(DispatchError::cancelled)?;
        self.discovery
            .describe(context, query.query(), &self.identity)
            .map_err(DispatchError::discovery)
    }

    fn discover_with_speculative_auth(
        &self,
        context: &RequestContext,
        query: &LegacyQuery,
    ) -> Result<Reply, DispatchError> {
        let mut reply = self.discover(context, query)?;
        // Only a successful continuation may populate this field.
        reply.remove(SPECULATIVE_AUTHENTICATE);

        let arguments = match query.query().expect_document(SPECULATIVE_AUTHENTICATE) {
            Ok(arguments) => arguments,
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "speculative authentication not applicable");
                return Ok(Reply::new(reply));
            }
        };

        let db = match arguments.expect_str(AUTH_DATABASE_FIELD) {
            Ok(db) => db,
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "speculative authentication not applicable");
                return Ok(Reply::new(reply));
            }
        };

        context.check().map_err(DispatchError::cancelled)?;
        match self.authenticator.sasl_start(context, db, arguments) {
            Ok(outcome) => {
                debug!(target: DISPATCH_TARGET, db, "speculative authentication succeeded");
                reply.set(SPECULATIVE_AUTHENTICATE, outcome);
            }
            Err(error) if error.is_cancellation() => return Err(DispatchError::cancelled(error)),
            Err(error) => {
                debug!(
                    target: DISPATCH_TARGET,
                    db,
                    %error,
                    "speculative authentication failed; omitting reply field"
                );
            }
        }

        Ok(Reply::new(reply))
    }
}

/// Returns the `speculativeAuthenticate` value unless it is absent or null.
fn speculative_request(command: &Document) -> Option<&Value> {
    command
        .get(SPECULATIVE_AUTHENTICATE)
        .filter(|value| !value.is_null())
}

fn not_implemented(query: &LegacyQuery) -> DispatchError {
    DispatchError::not_implemented(query.command_name(), query.full_collection_name())
}
