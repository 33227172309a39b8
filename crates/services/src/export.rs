//! Conversation export
//!
//! Produces the user-downloadable JSON document:
//! `{ exportDate, messages: [{ sender, text, timestamp }] }`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::message::{Message, Sender};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationExport {
    pub export_date: DateTime<Utc>,
    pub messages: Vec<ExportedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationExport {
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            export_date: Utc::now(),
            messages: messages
                .iter()
                .map(|m| ExportedMessage {
                    sender: m.sender,
                    text: m.text.clone(),
                    timestamp: m.timestamp,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to encode conversation export")
    }

    /// e.g. `mental-health-chat-2024-05-01.json`
    pub fn file_name(&self) -> String {
        format!("mental-health-chat-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    /// Write the export. A directory target gets the default file name.
    pub fn write_to(&self, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(self.file_name())
        } else {
            target.to_path_buf()
        };
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        tracing::info!("Exported {} messages to {}", self.messages.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Message> {
        vec![
            Message::greeting(),
            Message::new("I feel stuck", Sender::User),
            Message::new("Let's take one small step.", Sender::Bot),
        ]
    }

    #[test]
    fn test_document_shape() {
        let export = ConversationExport::from_messages(&sample());
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();

        assert!(json["exportDate"].is_string());
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["sender"], "user");
        assert_eq!(messages[1]["text"], "I feel stuck");
        assert!(messages[1]["timestamp"].is_string());
        assert!(messages[1].get("id").is_none());
    }

    #[test]
    fn test_write_into_directory_uses_default_name() {
        let dir = TempDir::new().unwrap();
        let export = ConversationExport::from_messages(&sample());

        let path = export.write_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), export.file_name());
        assert!(export.file_name().starts_with("mental-health-chat-"));

        let read_back: ConversationExport =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(read_back.messages, export.messages);
    }
}
