//! Storage for the user-supplied generation credential.
//!
//! The key sits behind [`CredentialVault`] so the cleartext file backend can
//! be replaced by an OS keychain without touching the session store.

use serde_json::Value;
use shared::error::PreferenceError;
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::preferences::KeyValueStore;

pub const CREDENTIAL_KEY: &str = "chatCredential";

pub trait CredentialVault: Send + Sync {
    fn load(&self) -> Result<Option<Zeroizing<String>>, PreferenceError>;

    /// Persist `key`; an empty key clears the stored credential.
    fn store(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Keeps the credential unencrypted in the preference file.
pub struct PlaintextVault {
    kv: Arc<dyn KeyValueStore>,
}

impl PlaintextVault {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }
}

impl CredentialVault for PlaintextVault {
    fn load(&self) -> Result<Option<Zeroizing<String>>, PreferenceError> {
        match self.kv.get(CREDENTIAL_KEY)? {
            Some(Value::String(key)) if !key.is_empty() => Ok(Some(Zeroizing::new(key))),
            Some(Value::String(_)) | None | Some(Value::Null) => Ok(None),
            Some(other) => Err(PreferenceError::Malformed {
                key: CREDENTIAL_KEY.to_string(),
                source: serde::de::Error::custom(format!(
                    "expected a string, found {}",
                    json_kind(&other)
                )),
            }),
        }
    }

    fn store(&self, key: &str) -> Result<(), PreferenceError> {
        if key.is_empty() {
            self.kv.remove(CREDENTIAL_KEY)
        } else {
            self.kv.set(CREDENTIAL_KEY, Value::String(key.to_string()))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Mask a credential for display, keeping the last four characters.
pub fn mask(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryKeyValueStore;

    #[test]
    fn test_store_and_load() {
        let vault = PlaintextVault::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(vault.load().unwrap().is_none());

        vault.store("AIza-secret").unwrap();
        assert_eq!(vault.load().unwrap().unwrap().as_str(), "AIza-secret");

        vault.store("").unwrap();
        assert!(vault.load().unwrap().is_none());
    }

    #[test]
    fn test_non_string_entry_is_malformed() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(CREDENTIAL_KEY, serde_json::json!(42)).unwrap();

        let vault = PlaintextVault::new(kv);
        assert!(matches!(
            vault.load(),
            Err(PreferenceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }
}
