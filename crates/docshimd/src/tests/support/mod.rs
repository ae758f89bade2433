//! Deterministic collaborators and loaders shared by the test suites.

mod captured_logs;
mod collaborators;
mod config_loader;

pub use captured_logs::CapturedLogs;
pub use collaborators::{AuthMode, RecordingAuth, StaticDiscovery};
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
