//! Shim bootstrap orchestration.

use std::sync::Arc;

use docshim_config::{Config, ConfigError};
use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::AuthContinuation;
use crate::context::RequestContext;
use crate::dispatch::{
    DISPATCH_TARGET, DispatchError, LegacyQuery, LegacyQueryRouter, Reply, error_document,
};
use crate::handshake::{ServerIdentity, TopologyDiscovery};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Tracing target for bootstrap events.
const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the shim configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {source}")]
    InvalidConfiguration {
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// A configured legacy-query dispatcher.
pub struct Shim<D, A> {
    config: Config,
    router: LegacyQueryRouter<D, A>,
    telemetry: TelemetryHandle,
}

impl<D, A> Shim<D, A>
where
    D: TopologyDiscovery,
    A: AuthContinuation,
{
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the router.
    #[must_use]
    pub fn router(&self) -> &LegacyQueryRouter<D, A> {
        &self.router
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Dispatches a legacy query, logging failures.
    ///
    /// Cancelled requests are logged at debug level; every other failure is
    /// a warning.
    ///
    /// # Errors
    ///
    /// Propagates the router's [`DispatchError`].
    pub fn handle_query(
        &self,
        context: &RequestContext,
        query: &LegacyQuery,
    ) -> Result<Reply, DispatchError> {
        self.router.route(context, query).inspect_err(|error| {
            if error.is_cancellation() {
                debug!(
                    target: DISPATCH_TARGET,
                    %error,
                    namespace = query.full_collection_name(),
                    "legacy query cancelled"
                );
                return;
            }
            warn!(
                target: DISPATCH_TARGET,
                %error,
                code = error.code().name(),
                argument = error.argument().as_deref(),
                namespace = query.full_collection_name(),
                "legacy query failed"
            );
        })
    }

    /// Renders `error` as an in-band error reply, unless it is a cancellation.
    #[must_use]
    pub fn error_reply(&self, error: &DispatchError) -> Option<Reply> {
        error_document(error).map(Reply::new)
    }
}

/// Bootstraps the shim using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration cannot be loaded or
/// validated, or telemetry cannot be installed.
pub fn bootstrap_with<D, A>(
    loader: &dyn ConfigLoader,
    discovery: D,
    authenticator: A,
) -> Result<Shim<D, A>, BootstrapError>
where
    D: TopologyDiscovery,
    A: AuthContinuation,
{
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    config
        .validate()
        .map_err(|source| BootstrapError::InvalidConfiguration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let identity = ServerIdentity::from_config(&config);
    info!(
        target: BOOTSTRAP_TARGET,
        tcp_host = identity.tcp_host(),
        repl_set_name = identity.repl_set_name(),
        max_bson_object_size_bytes = identity.max_bson_object_size_bytes(),
        "legacy query shim ready"
    );

    Ok(Shim {
        router: LegacyQueryRouter::new(identity, discovery, authenticator),
        config,
        telemetry,
    })
}

