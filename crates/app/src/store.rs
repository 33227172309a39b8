//! The owned session store
//!
//! Wraps [`SessionState`] with persistence: whenever a transition changes the
//! persisted subset (mode, AI flag, credential, settings) it is written back
//! through the preference store and the credential vault.

use services::credentials::{CredentialVault, PlaintextVault};
use services::preferences::PreferenceStore;

use crate::state::{reduce, Action, SessionState};

pub struct SessionStore {
    state: SessionState,
    prefs: PreferenceStore,
    vault: Box<dyn CredentialVault>,
    dark_mode: bool,
}

impl SessionStore {
    /// Build a store, applying any saved preferences before first use.
    pub fn load(prefs: PreferenceStore, vault: Box<dyn CredentialVault>) -> Self {
        let mut state = SessionState::default();

        if let Some(saved) = prefs.load_chat_state() {
            state.restore(&saved);
        }
        match vault.load() {
            Ok(Some(key)) => state.user_api_key = key.as_str().to_owned(),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load saved API key: {}", e),
        }
        let dark_mode = prefs.load_dark_mode().unwrap_or(false);

        tracing::debug!(
            mode = %state.selected_mode,
            use_ai = state.use_ai,
            "Session store loaded"
        );

        Self {
            state,
            prefs,
            vault,
            dark_mode,
        }
    }

    /// Store whose credential lives next to the other preferences
    pub fn with_plaintext_vault(prefs: PreferenceStore) -> Self {
        let vault = Box::new(PlaintextVault::new(prefs.backend()));
        Self::load(prefs, vault)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let before = self.state.persisted();
        let key_changed = matches!(action, Action::SetApiKey(_));

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        if self.state.persisted() != before {
            self.prefs.save_chat_state(&self.state.persisted());
        }
        if key_changed {
            if let Err(e) = self.vault.store(&self.state.user_api_key) {
                tracing::warn!("Failed to save API key: {}", e);
            }
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        self.prefs.save_dark_mode(dark);
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::credentials::CREDENTIAL_KEY;
    use services::preferences::{KeyValueStore, CHAT_STATE_KEY};
    use shared::message::Sender;
    use shared::mode::Mode;
    use shared::settings::SettingsPatch;
    use tempfile::TempDir;

    #[test]
    fn test_preferences_survive_restart() {
        let dir = TempDir::new().unwrap();

        let mut store = SessionStore::with_plaintext_vault(PreferenceStore::open(Some(dir.path())));
        store.dispatch(Action::SelectMode("anxiety".into()));
        store.dispatch(Action::SetAi(true));
        store.dispatch(Action::SetApiKey("secret-key".into()));
        store.dispatch(Action::MergeSettings(SettingsPatch {
            show_timestamps: Some(false),
            ..Default::default()
        }));
        store.dispatch(Action::AddMessage {
            text: "not persisted".into(),
            sender: Sender::User,
        });
        store.set_dark_mode(true);

        let reopened =
            SessionStore::with_plaintext_vault(PreferenceStore::open(Some(dir.path())));
        let state = reopened.state();
        assert_eq!(state.selected_mode, Mode::Anxiety);
        assert!(state.use_ai);
        assert_eq!(state.user_api_key, "secret-key");
        assert!(!state.settings.show_timestamps);
        assert_eq!(state.messages.len(), 1);
        assert!(reopened.dark_mode());
    }

    #[test]
    fn test_credential_not_stored_in_chat_state() {
        let prefs = PreferenceStore::in_memory();
        let mut store = SessionStore::with_plaintext_vault(prefs.clone());
        store.dispatch(Action::SetApiKey("abc".into()));
        store.dispatch(Action::ToggleAi);

        let chat_state = prefs.backend().get(CHAT_STATE_KEY).unwrap().unwrap();
        assert!(!chat_state.to_string().contains("abc"));
        assert_eq!(
            prefs.backend().get(CREDENTIAL_KEY).unwrap().unwrap(),
            serde_json::json!("abc")
        );

        store.dispatch(Action::SetApiKey(String::new()));
        assert!(prefs.backend().get(CREDENTIAL_KEY).unwrap().is_none());
    }

    #[test]
    fn test_malformed_saved_state_uses_defaults() {
        let prefs = PreferenceStore::in_memory();
        prefs
            .backend()
            .set(CHAT_STATE_KEY, serde_json::json!({"selectedMode": 12}))
            .unwrap();

        let store = SessionStore::with_plaintext_vault(prefs);
        assert_eq!(store.state().selected_mode, Mode::General);
        assert!(!store.state().use_ai);
    }

    #[test]
    fn test_unknown_saved_mode_is_coerced() {
        let prefs = PreferenceStore::in_memory();
        prefs
            .backend()
            .set(CHAT_STATE_KEY, serde_json::json!({"selectedMode": "tarot", "useAI": true}))
            .unwrap();

        let store = SessionStore::with_plaintext_vault(prefs);
        assert_eq!(store.state().selected_mode, Mode::General);
        assert!(store.state().use_ai);
    }

    #[test]
    fn test_theme_toggle() {
        let prefs = PreferenceStore::in_memory();
        let mut store = SessionStore::with_plaintext_vault(prefs.clone());
        assert!(!store.dark_mode());
        assert!(store.toggle_dark_mode());
        assert_eq!(prefs.load_dark_mode(), Some(true));
    }
}
