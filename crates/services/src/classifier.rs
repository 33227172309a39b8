//! Keyword classifier that maps a user message to a response category.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Topic bucket used to pick a fallback response list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Stress,
    Overwhelmed,
    Motivation,
    Goals,
    Focus,
    Breathing,
    Mindfulness,
    Confidence,
    Exercise,
    Sleep,
    Relationships,
    General,
    /// Catalog-only buckets; the classifier never returns these
    Procrastination,
    Present,
    Energy,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stress => "stress",
            Category::Overwhelmed => "overwhelmed",
            Category::Motivation => "motivation",
            Category::Goals => "goals",
            Category::Focus => "focus",
            Category::Breathing => "breathing",
            Category::Mindfulness => "mindfulness",
            Category::Confidence => "confidence",
            Category::Exercise => "exercise",
            Category::Sleep => "sleep",
            Category::Relationships => "relationships",
            Category::General => "general",
            Category::Procrastination => "procrastination",
            Category::Present => "present",
            Category::Energy => "energy",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tested in order; the first match wins.
const PATTERNS: &[(Category, &str)] = &[
    (Category::Stress, r"stress|anxious|worried|panic|fear|nervous|tension"),
    (Category::Overwhelmed, r"overwhelm|too much|can't handle|exhausted|burned out"),
    (Category::Motivation, r"motivation|motivated|lazy|procrastinat|energy|drive"),
    (Category::Goals, r"goal|goals|achieve|accomplish|plan|target"),
    (Category::Focus, r"focus|distract|concentrate|attention|mind wander"),
    (Category::Breathing, r"breath|breathing|relax|calm|peace"),
    (Category::Mindfulness, r"mindful|present|meditation|awareness|ground"),
    (Category::Confidence, r"confidence|doubt|believe|worth|capable|self-esteem"),
    (Category::Exercise, r"exercise|workout|fitness|movement|active|gym"),
    (Category::Sleep, r"sleep|insomnia|tired|rest|wake up"),
    (Category::Relationships, r"relationship|friend|family|social|lonely|isolated"),
];

static COMPILED: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();

fn compiled() -> &'static [(Category, Regex)] {
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(category, pattern)| (*category, Regex::new(pattern).unwrap()))
            .collect()
    })
}

/// Classify a message. Total: anything unmatched is [`Category::General`].
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    compiled()
        .iter()
        .find(|(_, re)| re.is_match(&lower))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Categories in the order the classifier tests them
pub fn priority_order() -> impl Iterator<Item = Category> {
    PATTERNS.iter().map(|(category, _)| *category)
}
