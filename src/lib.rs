//! Stratum: layered configuration bootstrap
//!
//! Merges a bundled master configuration with a user-overridable configuration
//! file and exposes a unified read/write view. On first run the override file
//! is extracted from a bundled default into a resolvable config directory;
//! afterwards the user's (possibly edited) file is loaded verbatim and layered
//! over the embedded master defaults.

pub mod bootstrap;
pub mod composite;
pub mod error;
pub mod logging;
pub mod paths;
pub mod resources;
pub mod service;
pub mod store;

pub use composite::CompositeConfig;
pub use error::ConfigError;
pub use service::{ConfigHandle, ConfigService, LoadReport, SaveOutcome};
pub use store::ConfigStore;

pub use toml::Value;
