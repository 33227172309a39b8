//! Input validation and display formatting helpers.

use std::time::Duration;

pub const MAX_MESSAGE_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("Message cannot be empty")]
    Empty,
    #[error("Message is too long. Please keep it under {max} characters.")]
    TooLong { max: usize },
}

/// Check raw input before it is sent.
pub fn validate_message(message: &str) -> Result<(), MessageError> {
    if message.trim().is_empty() {
        return Err(MessageError::Empty);
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(MessageError::TooLong {
            max: MAX_MESSAGE_LENGTH,
        });
    }
    Ok(())
}

/// Trim and collapse runs of whitespace to single spaces.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace and cap the length.
pub fn sanitize_input(input: &str) -> String {
    collapse_whitespace(input)
        .chars()
        .take(MAX_MESSAGE_LENGTH)
        .collect()
}

/// Cut `text` to `max` characters, appending `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Human session length: "Just started", "42s", "5m", "1h 3m"
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        return "Just started".to_string();
    }

    let seconds = duration.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(validate_message("   "), Err(MessageError::Empty));
        assert!(validate_message("hi").is_ok());
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(matches!(
            validate_message(&long),
            Err(MessageError::TooLong { .. })
        ));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_input("  hello \n\t  world  "), "hello world");
        let long = "b".repeat(MAX_MESSAGE_LENGTH * 2);
        assert_eq!(sanitize_input(&long).len(), MAX_MESSAGE_LENGTH);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(200)), "Just started");
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(format_duration(Duration::from_secs(300)), "5m");
        assert_eq!(format_duration(Duration::from_secs(3780)), "1h 3m");
    }
}
