//! Topology-discovery collaborator boundary.
//!
//! The discovery reply itself (`ismaster`, wire versions, limits, and so on) is
//! built outside this crate. The router only needs a [`TopologyDiscovery`]
//! implementation and the [`ServerIdentity`] it should report.

use std::sync::Arc;

use docshim_config::Config;
use docshim_document::Document;

use crate::context::{CollaboratorError, RequestContext};

/// Server facts advertised in the discovery reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    tcp_host: String,
    repl_set_name: Option<String>,
    max_bson_object_size_bytes: i32,
}

impl ServerIdentity {
    /// Creates an identity from its parts.
    pub fn new(
        tcp_host: impl Into<String>,
        repl_set_name: Option<String>,
        max_bson_object_size_bytes: i32,
    ) -> Self {
        Self {
            tcp_host: tcp_host.into(),
            repl_set_name,
            max_bson_object_size_bytes,
        }
    }

    /// Derives the identity from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tcp_host(),
            config.repl_set_name().map(str::to_owned),
            config.max_bson_object_size_bytes(),
        )
    }

    /// `host:port` reported to clients.
    #[must_use]
    pub fn tcp_host(&self) -> &str {
        &self.tcp_host
    }

    /// Replica-set name, `None` for a standalone server.
    #[must_use]
    pub fn repl_set_name(&self) -> Option<&str> {
        self.repl_set_name.as_deref()
    }

    /// Advertised maximum document size.
    #[must_use]
    pub fn max_bson_object_size_bytes(&self) -> i32 {
        self.max_bson_object_size_bytes
    }
}

/// Builds the reply to the `isMaster` handshake command.
pub trait TopologyDiscovery: Send + Sync {
    /// Produces the baseline discovery reply for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when the reply cannot be built or the
    /// request was cancelled.
    fn describe(
        &self,
        context: &RequestContext,
        command: &Document,
        identity: &ServerIdentity,
    ) -> Result<Document, CollaboratorError>;
}

impl<T> TopologyDiscovery for Arc<T>
where
    T: TopologyDiscovery + ?Sized,
{
    fn describe(
        &self,
        context: &RequestContext,
        command: &Document,
        identity: &ServerIdentity,
    ) -> Result<Document, CollaboratorError> {
        (**self).describe(context, command, identity)
    }
}
