//! Namespaced keys (`minecraft:diamond`).
//!
//! Keys name items, loot tables and constants in data files. They follow the
//! server's `NamespacedKey` character rules and order by `(namespace, path)`
//! so maps keyed by them iterate deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace assumed when a key omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was blank.
    #[error("registry key cannot be empty")]
    Empty,
    /// The namespace half is empty or has characters outside `a-z0-9._-`.
    #[error("invalid registry key namespace '{0}' (allowed: a-z0-9._-)")]
    Namespace(String),
    /// The path half is empty or has characters outside `a-z0-9/._-`.
    #[error("invalid registry key path '{0}' (allowed: a-z0-9/._-)")]
    Path(String),
}

/// A key of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse `namespace:path`, or a bare `path` in [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }
        let (namespace, path) = input.split_once(':').unwrap_or((DEFAULT_NAMESPACE, input));
        Self::new(namespace, path)
    }

    /// Build a key from its parts, validating both.
    pub fn new(namespace: &str, path: &str) -> Result<Self, RegistryKeyError> {
        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(RegistryKeyError::Namespace(namespace.to_string()));
        }
        if path.is_empty() || !path.chars().all(|c| c == '/' || is_namespace_char(c)) {
            return Err(RegistryKeyError::Path(path.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key in the `minecraft` namespace.
    pub fn minecraft(path: &str) -> Result<Self, RegistryKeyError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Namespace half.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Path half.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}
