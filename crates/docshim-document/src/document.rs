//! Ordered key/value documents.
//!
//! Field order is significant: command documents carry the command name as
//! their leading key, so the container keeps insertion order and never sorts.
//! Lookups match names exactly.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use thiserror::Error;

use crate::Value;

/// Errors raised by the typed field accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is absent from the document.
    #[error("required parameter \"{field}\" is missing")]
    Missing {
        /// Name of the missing field.
        field: String,
    },
    /// The field exists but holds a value of another type.
    #[error("required parameter \"{field}\" has type {actual} (expected {expected})")]
    WrongType {
        /// Name of the offending field.
        field: String,
        /// Type the caller asked for.
        expected: &'static str,
        /// Type actually stored.
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn wrong_type(field: impl Into<String>, expected: &'static str, actual: &Value) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual: actual.type_name(),
        }
    }
}

/// Ordered mapping from field name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Document::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the document has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Key of the leading field.
    ///
    /// Command documents name the command with their first key.
    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.fields.first().map(|(key, _)| key.as_str())
    }

    /// Iterates over the field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Looks up a field by exact name.
    ///
    /// An explicit null is returned as `Some(&Value::Null)`, which keeps it
    /// distinguishable from an absent field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` when the field is present, even if it is null.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets a field, replacing an existing value in place.
    ///
    /// New keys are appended after the existing fields. Returns the replaced
    /// value, if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = key.into();
        let replacement = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, replacement)),
            None => {
                self.fields.push((name, replacement));
                None
            }
        }
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let position = self.fields.iter().position(|(name, _)| name == key)?;
        Some(self.fields.remove(position).1)
    }

    /// Reads a field that must hold an embedded document.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if the field is absent and
    /// [`FieldError::WrongType`] if it holds anything else, including null.
    pub fn expect_document(&self, key: &str) -> Result<&Self, FieldError> {
        let value = self.get(key).ok_or_else(|| FieldError::missing(key))?;
        value
            .as_document()
            .ok_or_else(|| FieldError::wrong_type(key, "object", value))
    }

    /// Reads a field that must hold a string.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if the field is absent and
    /// [`FieldError::WrongType`] if it holds anything else.
    pub fn expect_str(&self, key: &str) -> Result<&str, FieldError> {
        let value = self.get(key).ok_or_else(|| FieldError::missing(key))?;
        value
            .as_str()
            .ok_or_else(|| FieldError::wrong_type(key, "string", value))
    }
}

impl<K, V> FromIterator<(K, V)> for Document
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut document = Self::new();
        for (key, value) in iter {
            document.set(key, value);
        }
        document
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
