//! Recording test doubles for the discovery and authentication collaborators.

use std::sync::Mutex;

use docshim_document::Document;

use crate::auth::AuthContinuation;
use crate::context::{CollaboratorError, RequestContext};
use crate::handshake::{ServerIdentity, TopologyDiscovery};

/// Discovery builder producing a reply derived only from the identity.
#[derive(Debug, Default)]
pub struct StaticDiscovery {
    calls: Mutex<usize>,
}

impl StaticDiscovery {
    /// Reply the builder returns for `identity`.
    #[must_use]
    pub fn reply_for(identity: &ServerIdentity) -> Document {
        let mut reply = Document::new()
            .with("ismaster", true)
            .with("me", identity.tcp_host())
            .with("maxBsonObjectSize", identity.max_bson_object_size_bytes());
        if let Some(name) = identity.repl_set_name() {
            reply.set("setName", name);
        }
        reply.with("ok", 1.0_f64)
    }

    /// Number of times the builder ran.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("discovery mutex poisoned")
    }
}

impl TopologyDiscovery for StaticDiscovery {
    fn describe(
        &self,
        context: &RequestContext,
        _command: &Document,
        identity: &ServerIdentity,
    ) -> Result<Document, CollaboratorError> {
        *self.calls.lock().expect("discovery mutex poisoned") += 1;
        context.check()?;
        Ok(Self::reply_for(identity))
    }
}

/// Scripted behaviour for [`RecordingAuth`].
#[derive(Debug, Clone, Default)]
pub enum AuthMode {
    /// Return the given document.
    Succeed(Document),
    /// Fail with an authentication error.
    #[default]
    Fail,
}

/// Authentication continuation that records the databases it was asked for.
#[derive(Debug, Default)]
pub struct RecordingAuth {
    mode: Mutex<AuthMode>,
    databases: Mutex<Vec<String>>,
}

impl RecordingAuth {
    /// Double answering with `mode`.
    #[must_use]
    pub fn with_mode(mode: AuthMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            databases: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the scripted behaviour.
    pub fn set_mode(&self, mode: AuthMode) {
        *self.mode.lock().expect("auth mutex poisoned") = mode;
    }

    /// Databases passed to `sasl_start`, in call order.
    #[must_use]
    pub fn databases(&self) -> Vec<String> {
        self.databases.lock().expect("auth mutex poisoned").clone()
    }
}

impl AuthContinuation for RecordingAuth {
    fn sasl_start(
        &self,
        _context: &RequestContext,
        db: &str,
        _arguments: &Document,
    ) -> Result<Document, CollaboratorError> {
        self.databases
            .lock()
            .expect("auth mutex poisoned")
            .push(db.to_owned());
        match &*self.mode.lock().expect("auth mutex poisoned") {
            AuthMode::Succeed(document) => Ok(document.clone()),
            AuthMode::Fail => Err(CollaboratorError::failed("authentication failed")),
        }
    }
}
