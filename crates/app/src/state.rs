//! Session state and its transitions
//!
//! [`SessionState`] is only ever changed through [`reduce`], a total function
//! over `(state, action)`. Nothing here touches storage or the network.

use chrono::{DateTime, Utc};
use shared::message::{Message, Sender};
use shared::mode::Mode;
use shared::settings::{ChatSettings, PersistedChatState, SettingsPatch};

/// Named transitions of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a message; id and timestamp are assigned here
    AddMessage { text: String, sender: Sender },
    SetLoading(bool),
    /// Unknown keys are ignored
    SelectMode(String),
    SetInput(String),
    SetApiKey(String),
    ToggleAi,
    SetAi(bool),
    MergeSettings(SettingsPatch),
    Reset,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub messages: Vec<Message>,
    pub input_draft: String,
    pub is_loading: bool,
    pub selected_mode: Mode,
    pub use_ai: bool,
    pub user_api_key: String,
    pub session_started_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub message_count: usize,
    pub total_characters: usize,
    pub mode_change_count: usize,
    pub settings: ChatSettings,
    /// Bumped on every reset; replies started under an older epoch are stale
    pub epoch: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            messages: vec![Message::greeting()],
            input_draft: String::new(),
            is_loading: false,
            selected_mode: Mode::General,
            use_ai: false,
            user_api_key: String::new(),
            session_started_at: Utc::now(),
            last_message_at: None,
            message_count: 0,
            total_characters: 0,
            mode_change_count: 0,
            settings: ChatSettings::default(),
            epoch: 0,
        }
    }
}

impl SessionState {
    pub fn current_mode(&self) -> Mode {
        self.selected_mode
    }

    pub fn session_duration(&self) -> std::time::Duration {
        (Utc::now() - self.session_started_at)
            .to_std()
            .unwrap_or_default()
    }

    /// Rounded characters per counted message, 0 before the first message
    pub fn average_message_length(&self) -> usize {
        if self.message_count == 0 {
            0
        } else {
            (self.total_characters as f64 / self.message_count as f64).round() as usize
        }
    }

    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    /// The part of the state that is written to preferences
    pub fn persisted(&self) -> PersistedChatState {
        PersistedChatState::new(self.selected_mode, self.use_ai, self.settings)
    }

    /// Apply saved preferences at startup. Does not count as a mode change.
    pub fn restore(&mut self, saved: &PersistedChatState) {
        self.selected_mode = saved.mode();
        if let Some(use_ai) = saved.use_ai {
            self.use_ai = use_ai;
        }
        if let Some(settings) = saved.settings {
            self.settings = settings;
        }
    }
}

pub fn reduce(mut state: SessionState, action: Action) -> SessionState {
    match action {
        Action::AddMessage { text, sender } => {
            state.message_count += 1;
            state.total_characters += text.chars().count();
            let message = Message::new(text, sender);
            state.last_message_at = Some(message.timestamp);
            state.messages.push(message);
        }
        Action::SetLoading(loading) => state.is_loading = loading,
        Action::SelectMode(key) => match Mode::from_key(&key) {
            Some(mode) => {
                state.selected_mode = mode;
                state.mode_change_count += 1;
            }
            None => tracing::debug!("Ignoring unknown mode '{}'", key),
        },
        Action::SetInput(draft) => state.input_draft = draft,
        Action::SetApiKey(key) => state.user_api_key = key,
        Action::ToggleAi => state.use_ai = !state.use_ai,
        Action::SetAi(enabled) => state.use_ai = enabled,
        Action::MergeSettings(patch) => state.settings.merge(&patch),
        Action::Reset => {
            state.messages = vec![Message::greeting()];
            state.input_draft.clear();
            state.session_started_at = Utc::now();
            state.last_message_at = None;
            state.message_count = 0;
            state.total_characters = 0;
            state.epoch += 1;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::GREETING;

    fn add(text: &str, sender: Sender) -> Action {
        Action::AddMessage {
            text: text.to_string(),
            sender,
        }
    }

    #[test]
    fn test_new_session_has_greeting() {
        let state = SessionState::default();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].text, GREETING);
        assert_eq!(state.messages[0].sender, Sender::Bot);
        assert_eq!(state.message_count, 0);
    }

    #[test]
    fn test_append_counts() {
        let mut state = SessionState::default();
        let n = 7;
        for i in 0..n {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            state = reduce(state, add("hello", sender));
        }

        assert_eq!(state.messages.len(), 1 + n);
        assert_eq!(state.message_count, n);
        assert_eq!(state.total_characters, 5 * n);
        assert_eq!(state.average_message_length(), 5);
        assert!(state.last_message_at.is_some());
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut state = SessionState::default();
        state = reduce(state, add("first", Sender::User));
        state = reduce(state, add("second", Sender::Bot));

        let texts: Vec<_> = state.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, [GREETING, "first", "second"]);
        assert_ne!(state.messages[1].id, state.messages[2].id);
    }

    #[test]
    fn test_select_unknown_mode_is_ignored() {
        let mut state = reduce(SessionState::default(), Action::SelectMode("energy".into()));
        assert_eq!(state.selected_mode, Mode::Energy);
        assert_eq!(state.mode_change_count, 1);

        state = reduce(state, Action::SelectMode("not_a_real_mode".into()));
        assert_eq!(state.selected_mode, Mode::Energy);
        assert_eq!(state.mode_change_count, 1);
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut state = SessionState::default();
        state = reduce(state, Action::SelectMode("mindfulness".into()));
        state = reduce(state, Action::SetAi(true));
        state = reduce(state, Action::SetApiKey("key".into()));
        state = reduce(
            state,
            Action::MergeSettings(SettingsPatch {
                compact_mode: Some(true),
                ..Default::default()
            }),
        );
        state = reduce(state, Action::SetInput("draft".into()));
        state = reduce(state, add("one", Sender::User));
        state = reduce(state, add("two", Sender::Bot));

        let before = state.session_started_at;
        let state = reduce(state, Action::Reset);

        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].text, GREETING);
        assert_eq!(state.message_count, 0);
        assert_eq!(state.total_characters, 0);
        assert!(state.input_draft.is_empty());
        assert!(state.session_started_at >= before);
        assert_eq!(state.epoch, 1);

        assert_eq!(state.selected_mode, Mode::Mindfulness);
        assert!(state.use_ai);
        assert_eq!(state.user_api_key, "key");
        assert!(state.settings.compact_mode);
        assert_eq!(state.mode_change_count, 1);
    }

    #[test]
    fn test_reset_twice_still_one_message() {
        let state = reduce(SessionState::default(), Action::Reset);
        let state = reduce(state, Action::Reset);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.epoch, 2);
    }

    #[test]
    fn test_toggle_and_loading_are_idempotent_where_expected() {
        let state = reduce(SessionState::default(), Action::ToggleAi);
        assert!(state.use_ai);
        let state = reduce(state, Action::ToggleAi);
        assert!(!state.use_ai);

        let state = reduce(state, Action::SetLoading(true));
        let state = reduce(state, Action::SetLoading(true));
        assert!(state.is_loading);
    }

    #[test]
    fn test_restore_coerces_unknown_mode() {
        let mut state = SessionState::default();
        state.restore(&PersistedChatState {
            selected_mode: Some("astrology".into()),
            use_ai: Some(true),
            settings: None,
        });

        assert_eq!(state.selected_mode, Mode::General);
        assert!(state.use_ai);
        assert_eq!(state.settings, ChatSettings::default());
        assert_eq!(state.mode_change_count, 0);
    }
}
