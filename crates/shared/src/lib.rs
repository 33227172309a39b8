pub mod config;
pub mod error;
pub mod message;
pub mod mode;

pub mod settings {
    use serde::{Deserialize, Serialize};

    use crate::mode::Mode;

    fn default_true() -> bool {
        true
    }

    /// Chat display preferences, persisted between runs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChatSettings {
        #[serde(default = "default_true")]
        pub auto_scroll: bool,
        #[serde(default)]
        pub sound_enabled: bool,
        #[serde(default)]
        pub compact_mode: bool,
        #[serde(default = "default_true")]
        pub show_timestamps: bool,
    }

    impl Default for ChatSettings {
        fn default() -> Self {
            Self {
                auto_scroll: true,
                sound_enabled: false,
                compact_mode: false,
                show_timestamps: true,
            }
        }
    }

    impl ChatSettings {
        /// Shallow merge: only fields present in the patch are overwritten.
        pub fn merge(&mut self, patch: &SettingsPatch) {
            if let Some(v) = patch.auto_scroll {
                self.auto_scroll = v;
            }
            if let Some(v) = patch.sound_enabled {
                self.sound_enabled = v;
            }
            if let Some(v) = patch.compact_mode {
                self.compact_mode = v;
            }
            if let Some(v) = patch.show_timestamps {
                self.show_timestamps = v;
            }
        }
    }

    /// Partial update for [`ChatSettings`]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettingsPatch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub auto_scroll: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub sound_enabled: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub compact_mode: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub show_timestamps: Option<bool>,
    }

    impl SettingsPatch {
        /// Build a single-field patch from a settings name such as `"compactMode"`
        /// or `"compact_mode"`.
        pub fn single(name: &str, value: bool) -> Option<Self> {
            let mut patch = Self::default();
            match name.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
                "autoscroll" => patch.auto_scroll = Some(value),
                "soundenabled" | "sound" => patch.sound_enabled = Some(value),
                "compactmode" | "compact" => patch.compact_mode = Some(value),
                "showtimestamps" | "timestamps" => patch.show_timestamps = Some(value),
                _ => return None,
            }
            Some(patch)
        }
    }

    /// The subset of session state that survives a restart.
    ///
    /// The user credential is deliberately absent; it is kept behind the
    /// credential vault in the services crate.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PersistedChatState {
        /// Raw mode key; unknown keys are coerced when applied
        #[serde(default)]
        pub selected_mode: Option<String>,
        #[serde(default, rename = "useAI")]
        pub use_ai: Option<bool>,
        #[serde(default)]
        pub settings: Option<ChatSettings>,
    }

    impl PersistedChatState {
        pub fn new(mode: Mode, use_ai: bool, settings: ChatSettings) -> Self {
            Self {
                selected_mode: Some(mode.key().to_string()),
                use_ai: Some(use_ai),
                settings: Some(settings),
            }
        }

        pub fn mode(&self) -> Mode {
            self.selected_mode
                .as_deref()
                .map(Mode::from_key_or_default)
                .unwrap_or_default()
        }
    }

    impl Default for PersistedChatState {
        fn default() -> Self {
            Self::new(Mode::General, false, ChatSettings::default())
        }
    }
}
