//! Slash commands typed at the prompt

use shared::settings::SettingsPatch;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/mode <key>`
    SelectMode(String),
    ListModes,
    /// Print the current mode's quick prompts
    Prompts,
    /// `/ai` toggles, `/ai on|off` sets
    Ai(Option<bool>),
    /// `/key <value>` stores a key, bare `/key` clears it
    SetKey(String),
    Settings(SettingsPatch),
    Stats,
    Export(Option<PathBuf>),
    Clear,
    Theme,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '/{0}', try /help")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  /mode <name>               switch coaching mode
  /modes                     list modes
  /prompts                   show quick prompts for the current mode
  /ai [on|off]               toggle remote replies
  /key [value]               set or clear your API key
  /settings <name> <on|off>  autoScroll, soundEnabled, compactMode, showTimestamps
  /stats                     session statistics
  /export [path]             save the conversation as JSON
  /clear                     start a new session
  /theme                     toggle dark mode
  /quit                      exit";

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a line starting with `/`. Returns `None` for ordinary chat input.
pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
    let rest = line.trim().strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match (name.as_str(), args.as_slice()) {
        ("mode", [key]) => Ok(Command::SelectMode(key.to_ascii_lowercase())),
        ("mode", _) => Err(CommandError::Usage("/mode <name>")),
        ("modes", _) => Ok(Command::ListModes),
        ("prompts", _) => Ok(Command::Prompts),
        ("ai", []) => Ok(Command::Ai(None)),
        ("ai", [value]) => parse_switch(value)
            .map(|v| Command::Ai(Some(v)))
            .ok_or(CommandError::Usage("/ai [on|off]")),
        ("ai", _) => Err(CommandError::Usage("/ai [on|off]")),
        ("key", []) => Ok(Command::SetKey(String::new())),
        ("key", [value]) => Ok(Command::SetKey(value.to_string())),
        ("key", _) => Err(CommandError::Usage("/key [value]")),
        ("settings", [setting, value]) => parse_switch(value)
            .and_then(|v| SettingsPatch::single(setting, v))
            .map(Command::Settings)
            .ok_or(CommandError::Usage("/settings <name> <on|off>")),
        ("settings", _) => Err(CommandError::Usage("/settings <name> <on|off>")),
        ("stats", _) => Ok(Command::Stats),
        ("export", []) => Ok(Command::Export(None)),
        ("export", [path]) => Ok(Command::Export(Some(PathBuf::from(path)))),
        ("export", _) => Err(CommandError::Usage("/export [path]")),
        ("clear" | "new", _) => Ok(Command::Clear),
        ("theme", _) => Ok(Command::Theme),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit" | "q", _) => Ok(Command::Quit),
        (other, _) => Err(CommandError::Unknown(other.to_string())),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(parse("I'm feeling stressed").is_none());
        assert!(parse("  hello /mode").is_none());
    }

    #[test]
    fn test_mode_command() {
        assert_eq!(
            parse("/mode Productivity"),
            Some(Ok(Command::SelectMode("productivity".into())))
        );
        assert_eq!(
            parse("/mode"),
            Some(Err(CommandError::Usage("/mode <name>")))
        );
    }

    #[test]
    fn test_ai_switch() {
        assert_eq!(parse("/ai"), Some(Ok(Command::Ai(None))));
        assert_eq!(parse("/ai ON"), Some(Ok(Command::Ai(Some(true)))));
        assert_eq!(parse("/ai off"), Some(Ok(Command::Ai(Some(false)))));
        assert!(matches!(parse("/ai maybe"), Some(Err(CommandError::Usage(_)))));
    }

    #[test]
    fn test_key_set_and_clear() {
        assert_eq!(parse("/key abc123"), Some(Ok(Command::SetKey("abc123".into()))));
        assert_eq!(parse("/key"), Some(Ok(Command::SetKey(String::new()))));
    }

    #[test]
    fn test_settings_command() {
        let parsed = parse("/settings compactMode on").unwrap().unwrap();
        assert_eq!(
            parsed,
            Command::Settings(SettingsPatch {
                compact_mode: Some(true),
                ..Default::default()
            })
        );
        assert!(matches!(
            parse("/settings fontSize on"),
            Some(Err(CommandError::Usage(_)))
        ));
    }

    #[test]
    fn test_export_with_and_without_path() {
        assert_eq!(parse("/export"), Some(Ok(Command::Export(None))));
        assert_eq!(
            parse("/export /tmp/chat.json"),
            Some(Ok(Command::Export(Some(PathBuf::from("/tmp/chat.json")))))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/dance"),
            Some(Err(CommandError::Unknown("dance".into())))
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("/exit"), Some(Ok(Command::Quit)));
        assert_eq!(parse("/new"), Some(Ok(Command::Clear)));
    }
}
