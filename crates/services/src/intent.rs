//! Lightweight intent analysis of user messages and follow-up suggestions.

use serde::Serialize;

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "crisis",
    "help me",
    "desperate",
    "can't cope",
    "suicidal",
    "self-harm",
    "hurt myself",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anxiety,
    Depression,
    Stress,
    Anger,
    Joy,
}

impl Emotion {
    const ALL: [Emotion; 5] = [
        Emotion::Anxiety,
        Emotion::Depression,
        Emotion::Stress,
        Emotion::Anger,
        Emotion::Joy,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Emotion::Anxiety => &["anxious", "worried", "nervous", "panic", "fear"],
            Emotion::Depression => &["sad", "depressed", "down", "hopeless", "empty"],
            Emotion::Stress => &["stressed", "overwhelmed", "pressure", "tension"],
            Emotion::Anger => &["angry", "frustrated", "mad", "irritated", "furious"],
            Emotion::Joy => &["happy", "excited", "great", "amazing", "wonderful"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIntent {
    pub is_urgent: bool,
    pub detected_emotion: Option<Emotion>,
    pub is_question: bool,
    pub message_length: usize,
    pub word_count: usize,
}

pub fn analyze(message: &str) -> UserIntent {
    let lower = message.to_lowercase();

    let is_urgent = URGENCY_KEYWORDS.iter().any(|k| lower.contains(k));
    let detected_emotion = Emotion::ALL
        .into_iter()
        .find(|e| e.keywords().iter().any(|k| lower.contains(k)));
    let is_question = lower.contains('?')
        || ["how", "what", "why", "when", "where"]
            .iter()
            .any(|w| lower.starts_with(w));

    UserIntent {
        is_urgent,
        detected_emotion,
        is_question,
        message_length: message.chars().count(),
        word_count: message.split_whitespace().count(),
    }
}

/// A crisis line shown alongside urgent messages
#[derive(Debug, Clone, Copy)]
pub struct CrisisResource {
    pub region: &'static str,
    pub name: &'static str,
    pub phone: Option<&'static str>,
    pub website: &'static str,
}

pub const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        region: "US",
        name: "988 Suicide & Crisis Lifeline",
        phone: Some("988"),
        website: "https://988lifeline.org/",
    },
    CrisisResource {
        region: "UK",
        name: "Samaritans",
        phone: Some("116 123"),
        website: "https://www.samaritans.org/",
    },
    CrisisResource {
        region: "International",
        name: "International Crisis Helplines",
        phone: None,
        website: "https://findahelpline.com/",
    },
];

/// Suggested next prompts based on the last bot reply.
pub fn follow_up_suggestions(last_bot_response: &str) -> Vec<&'static str> {
    let mut suggestions = Vec::new();

    if last_bot_response.contains("breathing") {
        suggestions.extend(["That helped, what's next?", "I'd like to try another technique"]);
    }
    if last_bot_response.contains("goal") {
        suggestions.extend(["Help me break this down further", "How do I stay motivated?"]);
    }
    if last_bot_response.contains("stress") {
        suggestions.extend(["I need more coping strategies", "Tell me about mindfulness"]);
    }

    suggestions
}
