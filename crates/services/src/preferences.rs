//! Persistent preferences
//!
//! A small key-value layer over a JSON file in the platform config dir.
//! Reads and writes never fail loudly: callers get defaults and the error is
//! logged as a warning.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::error::PreferenceError;
use shared::settings::PersistedChatState;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CHAT_STATE_KEY: &str = "chatState";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const FILE_NAME: &str = "preferences.json";

/// Raw key-value storage. Values are JSON documents.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError>;
    fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError>;
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// All entries live in one JSON object on disk
pub struct FileKeyValueStore {
    path: PathBuf,
    // serialises read-modify-write within this process
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `<dir>/preferences.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| PreferenceError::Malformed {
            key: self.path.display().to_string(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            PreferenceError::Encode {
                key: self.path.display().to_string(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn modify(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, Value>),
    ) -> Result<(), PreferenceError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable preferences: {}", e);
            BTreeMap::new()
        });
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

/// Volatile store, used when no config dir is available and in tests
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Platform config dir for the coach, e.g. `~/.config/MindfulCoach`
pub fn default_config_dir() -> PathBuf {
    directories::ProjectDirs::from("com.local", "Mindful Coach", "MindfulCoach")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./.mindful-coach"))
}

/// Typed access to the persisted preferences
#[derive(Clone)]
pub struct PreferenceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// File-backed store in `dir`, or the platform config dir
    pub fn open(dir: Option<&Path>) -> Self {
        let dir = dir.map(Path::to_path_buf).unwrap_or_else(default_config_dir);
        tracing::debug!("Preferences at {}", dir.join(FILE_NAME).display());
        Self::new(Arc::new(FileKeyValueStore::in_dir(&dir)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Underlying storage, shared with the credential vault
    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.kv)
    }

    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PreferenceError> {
        match self.kv.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| PreferenceError::Malformed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let value = serde_json::to_value(value).map_err(|source| PreferenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.kv.set(key, value)
    }

    /// Saved chat state, if any. Malformed data is logged and ignored.
    pub fn load_chat_state(&self) -> Option<PersistedChatState> {
        self.try_get(CHAT_STATE_KEY).unwrap_or_else(|e| {
            tracing::warn!("Failed to load saved chat state: {}", e);
            None
        })
    }

    pub fn save_chat_state(&self, state: &PersistedChatState) {
        if let Err(e) = self.try_set(CHAT_STATE_KEY, state) {
            tracing::warn!("Failed to save chat state: {}", e);
        }
    }

    /// Saved theme preference; `None` when the user never chose one
    pub fn load_dark_mode(&self) -> Option<bool> {
        self.try_get(DARK_MODE_KEY).unwrap_or_else(|e| {
            tracing::warn!("Failed to load theme preference: {}", e);
            None
        })
    }

    pub fn save_dark_mode(&self, dark: bool) {
        if let Err(e) = self.try_set(DARK_MODE_KEY, &dark) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::mode::Mode;
    use shared::settings::ChatSettings;
    use tempfile::TempDir;

    #[test]
    fn test_chat_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let settings = ChatSettings {
            compact_mode: true,
            ..Default::default()
        };

        let prefs = PreferenceStore::open(Some(dir.path()));
        prefs.save_chat_state(&PersistedChatState::new(Mode::Energy, true, settings));
        prefs.save_dark_mode(true);

        let reopened = PreferenceStore::open(Some(dir.path()));
        let state = reopened.load_chat_state().unwrap();
        assert_eq!(state.mode(), Mode::Energy);
        assert_eq!(state.use_ai, Some(true));
        assert_eq!(state.settings, Some(settings));
        assert_eq!(reopened.load_dark_mode(), Some(true));
    }

    #[test]
    fn test_missing_file_gives_nothing() {
        let dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::open(Some(dir.path()));
        assert!(prefs.load_chat_state().is_none());
        assert!(prefs.load_dark_mode().is_none());
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_NAME), "{not json").unwrap();

        let prefs = PreferenceStore::open(Some(dir.path()));
        assert!(prefs.load_chat_state().is_none());

        prefs.save_dark_mode(false);
        assert_eq!(prefs.load_dark_mode(), Some(false));
    }

    #[test]
    fn test_malformed_entry_is_reported() {
        let prefs = PreferenceStore::in_memory();
        prefs
            .backend()
            .set(CHAT_STATE_KEY, serde_json::json!("just a string"))
            .unwrap();

        let err = prefs.try_get::<PersistedChatState>(CHAT_STATE_KEY).unwrap_err();
        assert!(matches!(err, PreferenceError::Malformed { .. }));
        assert!(prefs.load_chat_state().is_none());
    }

    #[test]
    fn test_remove() {
        let kv = MemoryKeyValueStore::new();
        kv.set("a", serde_json::json!(1)).unwrap();
        kv.remove("a").unwrap();
        assert!(kv.get("a").unwrap().is_none());
    }
}
