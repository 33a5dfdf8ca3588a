//! Namespaced registry names.
//!
//! Blocks and items are named by keys of the form `namespace:path`
//! (e.g. `minecraft:poppy`). Config files and input scripts may omit the
//! namespace, in which case [`DEFAULT_NAMESPACE`] is assumed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was empty or whitespace.
    #[error("registry key cannot be empty")]
    Empty,
    /// Namespace part was empty or used characters outside `a-z0-9_.-`.
    #[error("invalid registry namespace {0:?} (allowed: a-z0-9_.-)")]
    InvalidNamespace(String),
    /// Path part was empty or used characters outside `a-z0-9_./-`.
    #[error("invalid registry path {0:?} (allowed: a-z0-9_./-)")]
    InvalidPath(String),
}

/// A namespaced key of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either `namespace:path` or a bare `path`.
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = input
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, input));
        let namespace = namespace.trim();
        let path = path.trim();

        if namespace.is_empty()
            || !namespace
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
        {
            return Err(RegistryKeyError::InvalidNamespace(namespace.to_string()));
        }
        if path.is_empty()
            || !path
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
        {
            return Err(RegistryKeyError::InvalidPath(path.to_string()));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build a key in the default namespace from a known-valid path.
    pub(crate) fn vanilla(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when the key lives in [`DEFAULT_NAMESPACE`].
    pub fn is_vanilla(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_key() {
        let key = RegistryKey::parse("minecraft:poppy").unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.path(), "poppy");
        assert_eq!(key.to_string(), "minecraft:poppy");
        assert!(key.is_vanilla());
    }

    #[test]
    fn bare_path_uses_default_namespace() {
        let key = RegistryKey::parse(" grass_block ").unwrap();
        assert_eq!(key.to_string(), "minecraft:grass_block");
    }

    #[test]
    fn rejects_empty_and_invalid() {
        assert_eq!(RegistryKey::parse("   "), Err(RegistryKeyError::Empty));
        assert!(matches!(
            RegistryKey::parse("Minecraft:poppy"),
            Err(RegistryKeyError::InvalidNamespace(_))
        ));
        assert!(matches!(
            RegistryKey::parse("minecraft:"),
            Err(RegistryKeyError::InvalidPath(_))
        ));
        assert!(RegistryKey::parse(":poppy").is_err());
        assert!(RegistryKey::parse("poppy?").is_err());
    }
}
