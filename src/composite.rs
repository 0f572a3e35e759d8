//! Merged read view over an ordered list of configuration layers.
//!
//! Earlier layers win on lookup: the override layer is pushed first, the
//! master defaults last. Writes route to the single writable layer and stay
//! in memory until the service persists them.

use crate::error::ConfigError;
use crate::store::ConfigStore;
use serde::de::DeserializeOwned;
use toml::Value;
use tracing::warn;

/// Layer name used for the user-editable override configuration.
pub const OVERRIDE_LAYER: &str = "override";

/// Layer name used for the bundled master defaults.
pub const MASTER_LAYER: &str = "master";

#[derive(Debug, Clone)]
struct Layer {
    name: String,
    store: ConfigStore,
    writable: bool,
}

/// Ordered composite of configuration layers with first-match precedence.
#[derive(Debug, Clone, Default)]
pub struct CompositeConfig {
    layers: Vec<Layer>,
}

impl CompositeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer. Layers are consulted in push order, so push higher
    /// precedence layers first.
    pub fn push_layer(&mut self, name: impl Into<String>, store: ConfigStore, writable: bool) {
        self.layers.push(Layer {
            name: name.into(),
            store,
            writable,
        });
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.name == name)
    }

    fn first_containing(&self, key: &str) -> Option<&ConfigStore> {
        self.layers
            .iter()
            .map(|layer| &layer.store)
            .find(|store| store.contains_key(key))
    }

    /// Look up a value by dotted key; the first layer containing it wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.first_containing(key)?.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.first_containing(key).is_some()
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.first_containing(key) {
            None => Ok(None),
            Some(store) => store.get_as(key),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.first_containing(key) {
            None => Ok(None),
            Some(store) => store.get_string(key),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.first_containing(key) {
            None => Ok(None),
            Some(store) => store.get_i64(key),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.first_containing(key) {
            None => Ok(None),
            Some(store) => store.get_f64(key),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.first_containing(key) {
            None => Ok(None),
            Some(store) => store.get_bool(key),
        }
    }

    /// Set a value in the writable layer. In-memory only; persisting is the
    /// service's job. Returns false when no writable layer is present
    /// (degraded composite after a failed override load).
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.layers.iter_mut().find(|layer| layer.writable) {
            Some(layer) => {
                layer.store.set(key, value);
                true
            }
            None => {
                warn!(key, "no writable configuration layer; set ignored");
                false
            }
        }
    }

    /// A layer's store by name.
    pub fn layer_store(&self, name: &str) -> Option<&ConfigStore> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| &layer.store)
    }

    /// The writable layer's store, if one was loaded.
    pub fn writable_store(&self) -> Option<&ConfigStore> {
        self.layers
            .iter()
            .find(|layer| layer.writable)
            .map(|layer| &layer.store)
    }
}
