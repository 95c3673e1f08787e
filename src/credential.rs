//! Credential resolver — finds the Gemini API key.
//!
//! DESIGN
//! ======
//! Sources are checked in a fixed order: the managed secrets file first,
//! then the process environment. The first non-empty value wins. Any
//! failure while reading a source counts as "not found" for that source;
//! nothing is surfaced to the user.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

/// Fixed key name, used both in the secrets file and the environment.
pub const KEY_NAME: &str = "GEMINI_API_KEY";

// =============================================================================
// CREDENTIAL
// =============================================================================

/// Opaque, non-empty API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key. Returns `None` for empty or whitespace-only input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// =============================================================================
// SECRET STORE
// =============================================================================

/// Errors from a secret store lookup. Never leave this module's callers.
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("failed to read secrets file {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("secrets file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("secret {key} is not a string")]
    NotAString { key: String },
}

/// A managed key/value secret source.
pub trait SecretStore: Send + Sync {
    /// Look up `key`. `Ok(None)` when the store has no such entry.
    ///
    /// # Errors
    ///
    /// Returns a [`SecretsError`] when the store itself cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SecretsError>;
}

/// Secrets kept in a flat TOML file (`GEMINI_API_KEY = "..."`).
///
/// A missing file is an empty store, not an error.
pub struct TomlSecrets {
    path: PathBuf,
}

impl TomlSecrets {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretStore for TomlSecrets {
    fn get(&self, key: &str) -> Result<Option<String>, SecretsError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SecretsError::Read { path: self.path.clone(), source }),
        };

        let table: toml::Table = toml::from_str(&contents)?;
        match table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(SecretsError::NotAString { key: key.to_owned() }),
        }
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve the API key from `store`, then the process environment.
#[must_use]
pub fn resolve(store: &dyn SecretStore) -> Option<Credential> {
    resolve_with(store, |key| std::env::var(key).ok())
}

/// Resolution with an injectable environment lookup.
pub fn resolve_with(store: &dyn SecretStore, env: impl Fn(&str) -> Option<String>) -> Option<Credential> {
    let from_store = match store.get(KEY_NAME) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "secret store lookup failed; treating key as absent there");
            None
        }
    };

    from_store
        .and_then(Credential::new)
        .or_else(|| env(KEY_NAME).and_then(Credential::new))
}

#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;
