//! Secret storage for OAuth consumer and token keys.
//!
//! [`SecretStore`] abstracts the lookup of shared secrets away from the
//! verification pipeline. [`MemorySecretStore`] is the in-memory
//! implementation; real deployments back the trait with a database.

use std::collections::HashMap;

/// Trait for resolving shared secrets from consumer or token keys.
///
/// Unknown keys resolve to the empty string rather than an error: OAuth 1.0
/// tokens are optional, and a launch without `oauth_token` must degrade to
/// an empty token secret.
pub trait SecretStore: Send + Sync {
    /// The secret associated with `key`, or the empty string if unknown.
    fn get_secret(&self, key: &str) -> String;

    /// Whether a secret is stored under `key`.
    fn has_key(&self, key: &str) -> bool;
}

/// A simple in-memory secret store backed by a `HashMap`.
///
/// Concurrent reads are safe; writes take `&mut self`, so callers mixing
/// reads and writes provide their own synchronization.
///
/// # Examples
///
/// ```
/// use lti_auth::store::{MemorySecretStore, SecretStore};
///
/// let mut store = MemorySecretStore::new();
/// store.set_secret("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
///
/// assert_eq!(store.get_secret("dpf43f3p2l4k3l03"), "kd94hf93k423kf44");
/// assert_eq!(store.get_secret("unknown"), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    secrets: HashMap<String, String>,
}

impl MemorySecretStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an iterable of (key, secret) pairs.
    pub fn with_secrets(secrets: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            secrets: secrets.into_iter().collect(),
        }
    }

    /// Store `secret` under `key`, replacing any previous value.
    pub fn set_secret(&mut self, key: impl Into<String>, secret: impl Into<String>) {
        self.secrets.insert(key.into(), secret.into());
    }
}

impl SecretStore for MemorySecretStore {
    fn get_secret(&self, key: &str) -> String {
        self.secrets.get(key).cloned().unwrap_or_default()
    }

    fn has_key(&self, key: &str) -> bool {
        self.secrets.contains_key(key)
    }
}
