//! Plain-terminal formatting for the chat
//!
//! Everything here returns `String`s; printing is left to `main`.

use chrono::Local;
use services::credentials::mask;
use services::intent::{follow_up_suggestions, UserIntent, CRISIS_RESOURCES};
use services::text::format_duration;
use shared::message::Message;
use shared::mode::Mode;
use shared::settings::ChatSettings;
use std::fmt::Write;

use crate::state::SessionState;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BELL: &str = "\x07";

/// Colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub user: &'static str,
    pub bot: &'static str,
}

impl Palette {
    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                user: "\x1b[96m",
                bot: "\x1b[95m",
            }
        } else {
            Self {
                user: "\x1b[34m",
                bot: "\x1b[35m",
            }
        }
    }
}

fn mode_color((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub fn message(msg: &Message, settings: &ChatSettings, dark: bool) -> String {
    let palette = Palette::for_theme(dark);
    let (label, color) = if msg.is_user() {
        ("You", palette.user)
    } else {
        ("Coach", palette.bot)
    };

    let mut out = String::new();
    if settings.show_timestamps {
        let local = msg.timestamp.with_timezone(&Local);
        let _ = write!(out, "{DIM}[{}]{RESET} ", local.format("%H:%M"));
    }
    let _ = write!(out, "{color}{label}:{RESET}");
    if settings.compact_mode {
        let _ = write!(out, " {}", msg.text);
    } else {
        let _ = write!(out, "\n  {}\n", msg.text.replace('\n', "\n  "));
    }
    out
}

/// A reply line, ringing the bell first when sounds are on
pub fn reply(msg: &Message, settings: &ChatSettings, dark: bool) -> String {
    let text = message(msg, settings, dark);
    if settings.sound_enabled {
        format!("{BELL}{text}")
    } else {
        text
    }
}

pub fn transcript(state: &SessionState, dark: bool) -> String {
    state
        .messages
        .iter()
        .map(|m| message(m, &state.settings, dark))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn mode_banner(mode: Mode) -> String {
    format!(
        "{}{} {}{RESET} {DIM}{}{RESET}",
        mode_color(mode.color()),
        mode.icon(),
        mode.title(),
        mode.description()
    )
}

pub fn mode_list(current: Mode) -> String {
    Mode::all()
        .iter()
        .map(|mode| {
            let marker = if *mode == current { '*' } else { ' ' };
            format!(
                "{} {:<13} {} {}",
                marker,
                mode.key(),
                mode.icon(),
                mode.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn quick_prompts(mode: Mode) -> String {
    let mut out = format!("Try asking ({}):", mode.title());
    for prompt in mode.quick_prompts() {
        let _ = write!(out, "\n  - {}", prompt);
    }
    out
}

pub fn stats(state: &SessionState, remote_available: bool) -> String {
    let key = if state.user_api_key.is_empty() {
        "(none)".to_string()
    } else {
        mask(&state.user_api_key)
    };
    let last = state
        .last_message_at
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Session duration:    {}\n\
         Messages:            {}\n\
         Average length:      {} chars\n\
         Last message:        {}\n\
         Mode changes:        {}\n\
         Current mode:        {}\n\
         Remote replies:      {}\n\
         API key:             {}",
        format_duration(state.session_duration()),
        state.message_count,
        state.average_message_length(),
        last,
        state.mode_change_count,
        state.selected_mode.title(),
        match (state.use_ai, remote_available) {
            (true, true) => "on",
            (true, false) => "on (no key, using built-in replies)",
            (false, _) => "off",
        },
        key
    )
}

pub fn settings(settings: &ChatSettings) -> String {
    let flag = |on: bool| if on { "on" } else { "off" };
    format!(
        "autoScroll {}  soundEnabled {}  compactMode {}  showTimestamps {}",
        flag(settings.auto_scroll),
        flag(settings.sound_enabled),
        flag(settings.compact_mode),
        flag(settings.show_timestamps)
    )
}

/// Crisis lines, shown when a message reads as urgent
pub fn crisis_notice(intent: &UserIntent) -> Option<String> {
    if !intent.is_urgent {
        return None;
    }
    let mut out = String::from(
        "If you are in crisis or thinking about harming yourself, please reach out now:",
    );
    for resource in CRISIS_RESOURCES {
        match resource.phone {
            Some(phone) => {
                let _ = write!(
                    out,
                    "\n  {}: {} ({}) {}",
                    resource.region, resource.name, phone, resource.website
                );
            }
            None => {
                let _ = write!(
                    out,
                    "\n  {}: {} {}",
                    resource.region, resource.name, resource.website
                );
            }
        }
    }
    Some(out)
}

pub fn suggestions(last_bot: &str) -> Option<String> {
    let suggestions = follow_up_suggestions(last_bot);
    if suggestions.is_empty() {
        return None;
    }
    Some(format!("{DIM}Suggestions: {}{RESET}", suggestions.join(" | ")))
}
