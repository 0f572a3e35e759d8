//! Hierarchical key-value store backed by a TOML document.
//!
//! Keys are dotted paths (`logging.level`) navigating nested tables. The
//! store is the building block for both the user-editable override layer and
//! the embedded master defaults.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;
use toml::{Table, Value};

/// A mutable hierarchical configuration store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    root: Table,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from TOML text. `origin` names the document in errors.
    pub fn from_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let root = text.parse::<Table>().map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Read and parse a store from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&text, &path.display().to_string())
    }

    /// Look up a value by dotted key path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Typed lookup via serde deserialization of the stored value.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value.clone().try_into().map(Some).map_err(|_| {
                ConfigError::ValueType {
                    key: key.to_string(),
                    expected: std::any::type_name::<T>(),
                }
            }),
        }
    }

    /// String lookup; scalar values (integer, float, boolean) stringify.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Integer(i)) => Ok(Some(i.to_string())),
            Some(Value::Float(f)) => Ok(Some(f.to_string())),
            Some(Value::Boolean(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(self.type_error(key, "string")),
        }
    }

    /// Integer lookup; numeric strings coerce.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Integer(i)) => Ok(Some(*i)),
            Some(Value::String(s)) => match s.parse::<i64>() {
                Ok(i) => Ok(Some(i)),
                Err(_) => Err(self.type_error(key, "integer")),
            },
            Some(_) => Err(self.type_error(key, "integer")),
        }
    }

    /// Float lookup; integers widen and numeric strings coerce.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Float(f)) => Ok(Some(*f)),
            Some(Value::Integer(i)) => Ok(Some(*i as f64)),
            Some(Value::String(s)) => match s.parse::<f64>() {
                Ok(f) => Ok(Some(f)),
                Err(_) => Err(self.type_error(key, "float")),
            },
            Some(_) => Err(self.type_error(key, "float")),
        }
    }

    /// Boolean lookup; the strings "true"/"false"/"1"/"0" coerce.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(self.type_error(key, "boolean")),
            },
            Some(_) => Err(self.type_error(key, "boolean")),
        }
    }

    /// Set a value at a dotted key path, creating intermediate tables.
    /// A non-table value standing where an intermediate table is needed is
    /// replaced by a table.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = key.split('.').collect();
        let last = match segments.pop() {
            Some(last) => last,
            None => return,
        };

        let mut table = &mut self.root;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            table = entry
                .as_table_mut()
                .expect("entry was just ensured to be a table");
        }
        table.insert(last.to_string(), value.into());
    }

    /// Remove a value at a dotted key path; returns the removed value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let mut segments: Vec<&str> = key.split('.').collect();
        let last = segments.pop()?;

        let mut table = &self.root;
        // Walk immutably first so a missing intermediate leaves nothing changed.
        for segment in &segments {
            table = table.get(*segment)?.as_table()?;
        }
        if !table.contains_key(last) {
            return None;
        }

        let mut table = &mut self.root;
        for segment in segments {
            table = table.get_mut(segment)?.as_table_mut()?;
        }
        table.remove(last)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Serialize the store back to TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.root)
    }

    /// Persist the store's current state to a file, overwriting it.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let persist_error = |source: crate::error::PersistError| ConfigError::Persist {
            path: path.to_path_buf(),
            source,
        };
        let text = self.to_toml_string().map_err(|e| persist_error(e.into()))?;
        std::fs::write(path, text).map_err(|e| persist_error(e.into()))?;
        Ok(())
    }

    fn type_error(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::ValueType {
            key: key.to_string(),
            expected,
        }
    }
}
