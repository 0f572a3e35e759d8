//! Configuration service: load, merge, expose, persist.
//!
//! `ConfigService` is constructed once at application startup and passed by
//! handle. `load` resolves the override directory, bootstraps the override
//! file from the bundled default on first run, and layers the override over
//! the embedded master defaults. `save` persists the override layer only.

use crate::bootstrap;
use crate::composite::{CompositeConfig, MASTER_LAYER, OVERRIDE_LAYER};
use crate::error::ConfigError;
use crate::paths;
use crate::resources;
use crate::store::ConfigStore;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use toml::Value;
use tracing::{error, info};

#[derive(Default)]
struct State {
    composite: CompositeConfig,
    override_path: Option<PathBuf>,
}

struct Shared {
    state: RwLock<State>,
    // Serializes load and save against each other and themselves. Lookups
    // through ConfigHandle only contend on the state lock.
    io_lock: Mutex<()>,
}

/// Outcome of a `load` call. Per-layer failures degrade the composite
/// instead of aborting, and are reported here.
#[derive(Debug)]
pub struct LoadReport {
    /// Resolved override config directory.
    pub directory: PathBuf,
    /// Resolved override file path.
    pub file: PathBuf,
    /// Whether the override file was just extracted from the bundled default.
    pub bootstrapped: bool,
    /// Parse/read failure of the override file, if any.
    pub override_error: Option<ConfigError>,
    /// Parse failure of the embedded master document, if any.
    pub master_error: Option<ConfigError>,
}

impl LoadReport {
    /// True when both layers loaded.
    pub fn fully_loaded(&self) -> bool {
        self.override_error.is_none() && self.master_error.is_none()
    }
}

/// Outcome of a `save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Override layer persisted to its backing file.
    Saved(PathBuf),
    /// No override layer has been loaded; nothing to persist.
    NothingLoaded,
}

/// Process-wide configuration service. Cheap to clone; all clones share the
/// same state.
#[derive(Clone)]
pub struct ConfigService {
    shared: Arc<Shared>,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    /// Create a service with an empty composite. Call `load` to populate it.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(State::default()),
                io_lock: Mutex::new(()),
            }),
        }
    }

    /// Load (or reload) the configuration.
    ///
    /// 1. Resolve the override directory (`STRATUM_CONFIG_DIR`, else
    ///    `<temp>/<default_dir_name>`), creating it if absent.
    /// 2. Extract the bundled default override file if none exists.
    /// 3. Parse the override file and the embedded master defaults into a
    ///    fresh composite, override first.
    ///
    /// Directory or extraction failure returns `Err` and leaves the current
    /// composite untouched. A parse failure of either layer is recorded in
    /// the report and that layer is simply absent from the new composite.
    pub fn load(&self, default_dir_name: &str) -> Result<LoadReport, ConfigError> {
        let _io = self.shared.io_lock.lock();

        let directory = paths::resolve_config_dir(default_dir_name)?;
        let (file, bootstrapped) = bootstrap::ensure_override_file(&directory)?;

        let mut composite = CompositeConfig::new();
        let mut override_error = None;
        match ConfigStore::from_file(&file) {
            Ok(store) => composite.push_layer(OVERRIDE_LAYER, store, true),
            Err(err) => {
                error!(error = %err, "Exception reading override configuration");
                override_error = Some(err);
            }
        }

        // Defaults must be added last, so they lose on shared keys.
        let mut master_error = None;
        match ConfigStore::from_str(resources::MASTER_CONFIG, resources::MASTER_ORIGIN) {
            Ok(store) => composite.push_layer(MASTER_LAYER, store, false),
            Err(err) => {
                error!(error = %err, "Exception reading master configuration");
                master_error = Some(err);
            }
        }

        let override_loaded = override_error.is_none();
        {
            let mut state = self.shared.state.write();
            state.composite = composite;
            state.override_path = override_loaded.then(|| file.clone());
        }

        if override_loaded {
            info!(file = %file.display(), "Configuration successfully loaded");
        }

        Ok(LoadReport {
            directory,
            file,
            bootstrapped,
            override_error,
            master_error,
        })
    }

    /// `load` with the original swallow-and-log policy: failures are logged
    /// and the service keeps serving whatever it has.
    pub fn load_or_log(&self, default_dir_name: &str) {
        if let Err(err) = self.load(default_dir_name) {
            error!(error = %err, "Exception loading configuration");
        }
    }

    /// Persist the override layer's current in-memory state to its backing
    /// file. A no-op when no override layer has been loaded. The master
    /// defaults are never persisted.
    pub fn save(&self) -> Result<SaveOutcome, ConfigError> {
        let _io = self.shared.io_lock.lock();

        let (store, path) = {
            let state = self.shared.state.read();
            match (state.composite.writable_store(), &state.override_path) {
                (Some(store), Some(path)) => (store.clone(), path.clone()),
                _ => return Ok(SaveOutcome::NothingLoaded),
            }
        };

        store.save_to(&path)?;
        info!(file = %path.display(), "Configuration saved");
        Ok(SaveOutcome::Saved(path))
    }

    /// `save` with the original swallow-and-log policy.
    pub fn save_or_log(&self) {
        if let Err(err) = self.save() {
            error!(error = %err, "Exception saving configuration");
        }
    }

    /// Handle to the merged configuration view. Always usable; before a
    /// successful `load` it reads from an empty composite.
    pub fn get_config(&self) -> ConfigHandle {
        ConfigHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Read/write handle to the shared composite configuration.
///
/// Reads consult layers in precedence order; `set` mutates the override
/// layer in memory only. Call `ConfigService::save` to flush to disk.
#[derive(Clone)]
pub struct ConfigHandle {
    shared: Arc<Shared>,
}

impl ConfigHandle {
    pub fn get(&self, key: &str) -> Option<Value> {
        self.shared.state.read().composite.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.shared.state.read().composite.contains_key(key)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.shared.state.read().composite.get_as(key)
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.shared.state.read().composite.get_string(key)
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        self.shared.state.read().composite.get_i64(key)
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        self.shared.state.read().composite.get_f64(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.shared.state.read().composite.get_bool(key)
    }

    /// Set a value in the override layer, in memory only. Returns false when
    /// no override layer is loaded.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        self.shared.state.write().composite.set(key, value)
    }

    pub fn layer_count(&self) -> usize {
        self.shared.state.read().composite.layer_count()
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.shared.state.read().composite.has_layer(name)
    }
}
