//! Coaching modes.
//!
//! Each mode is a coaching persona: it carries the system instruction sent to
//! the generation endpoint, a set of suggested opening prompts, and the
//! display attributes the front end needs. All of it is plain data matched on
//! the variant.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    General,
    Productivity,
    Mindfulness,
    Motivation,
    Anxiety,
    Energy,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[
            Mode::General,
            Mode::Productivity,
            Mode::Mindfulness,
            Mode::Motivation,
            Mode::Anxiety,
            Mode::Energy,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Productivity => "productivity",
            Mode::Mindfulness => "mindfulness",
            Mode::Motivation => "motivation",
            Mode::Anxiety => "anxiety",
            Mode::Energy => "energy",
        }
    }

    /// Look up a mode by its key. Unknown keys return `None`.
    pub fn from_key(key: &str) -> Option<Mode> {
        Mode::all().iter().copied().find(|m| m.key() == key)
    }

    /// Look up a mode by its key, coercing unknown keys to [`Mode::General`].
    pub fn from_key_or_default(key: &str) -> Mode {
        Mode::from_key(key).unwrap_or_default()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Mode::General => "General Support",
            Mode::Productivity => "Productivity Coach",
            Mode::Mindfulness => "Mindfulness Guide",
            Mode::Motivation => "Motivation Coach",
            Mode::Anxiety => "Anxiety Support",
            Mode::Energy => "Energy & Vitality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::General => "Comprehensive mental health and wellness guidance",
            Mode::Productivity => "Goal-setting, time management, and peak performance",
            Mode::Mindfulness => "Meditation, breathing exercises, and present-moment awareness",
            Mode::Motivation => "Building confidence, overcoming obstacles, and staying inspired",
            Mode::Anxiety => "Specialized support for worry, panic, and anxious thoughts",
            Mode::Energy => "Boosting energy, motivation, and overall vitality",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Mode::General => "💬",
            Mode::Productivity => "🎯",
            Mode::Mindfulness => "🧠",
            Mode::Motivation => "💡",
            Mode::Anxiety => "💚",
            Mode::Energy => "⚡",
        }
    }

    /// Accent colour as RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Mode::General => (59, 130, 246),
            Mode::Productivity => (34, 197, 94),
            Mode::Mindfulness => (168, 85, 247),
            Mode::Motivation => (249, 115, 22),
            Mode::Anxiety => (20, 184, 166),
            Mode::Energy => (234, 179, 8),
        }
    }

    /// System instruction sent ahead of every remote generation request.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Mode::General => "You are a compassionate mental health and wellness coach with expertise in general emotional support and well-being.

Your approach should be:
- Warm, empathetic, and non-judgmental
- Focused on general wellness, coping strategies, and emotional support
- Encouraging self-awareness and personal growth
- Validating feelings while offering practical guidance

Always remind users that you are not a replacement for professional therapy and encourage seeking professional help for serious mental health concerns.

Keep responses conversational, supportive, and under 200 words.",
            Mode::Productivity => "You are an expert productivity coach specializing in time management, goal-setting, habit formation, and motivation.

Your focus areas include:
- Breaking down large goals into manageable steps
- Time management and prioritization techniques
- Overcoming procrastination and building momentum
- Creating sustainable routines and habits
- Work-life balance and preventing burnout

Provide practical, actionable advice while being encouraging and realistic about what's achievable.

Keep responses focused, practical, and under 200 words.",
            Mode::Mindfulness => "You are a mindfulness and meditation guide with deep knowledge of contemplative practices, stress reduction, and present-moment awareness.

Your specialties include:
- Breathing exercises and relaxation techniques
- Mindfulness meditation and body awareness
- Stress reduction and anxiety management
- Grounding techniques for overwhelming emotions
- Cultivating present-moment awareness

Guide users through practical exercises and techniques they can use immediately.
Be gentle, patient, and encouraging in your approach.

Keep responses calming, instructional, and under 200 words.",
            Mode::Motivation => "You are an inspiring motivation coach who specializes in building confidence, overcoming self-doubt, and maintaining positive momentum.

Your core strengths include:
- Building self-confidence and self-worth
- Helping overcome limiting beliefs and fears
- Celebrating achievements and progress
- Reframing challenges as growth opportunities
- Maintaining motivation during difficult times

Be encouraging, uplifting, and help users see their own potential and strength.
Focus on empowerment and positive mindset shifts.

Keep responses inspiring, energizing, and under 200 words.",
            Mode::Anxiety => "You are a specialized anxiety support coach with expertise in helping people manage worry, panic, and anxious thoughts.

Your focus areas include:
- Understanding and normalizing anxiety responses
- Grounding techniques for panic attacks
- Cognitive strategies for anxious thoughts
- Progressive muscle relaxation and breathing
- Building tolerance for uncertainty

Be especially gentle, reassuring, and provide immediate coping strategies.
Always validate the difficulty of anxiety while offering hope and practical tools.

Keep responses calming, supportive, and under 200 words.",
            Mode::Energy => "You are an energy and vitality coach focused on helping people boost their physical and mental energy levels naturally.

Your expertise includes:
- Natural energy boosting strategies
- Sleep optimization and circadian rhythms
- Nutrition for sustained energy
- Movement and exercise for vitality
- Managing energy drains and energy gains

Provide practical, science-based advice for improving energy levels.
Be energetic and encouraging while being realistic about sustainable changes.

Keep responses energizing, practical, and under 200 words.",
        }
    }

    pub fn quick_prompts(&self) -> &'static [&'static str] {
        match self {
            Mode::General => &[
                "I'm feeling overwhelmed with life",
                "I need help managing my emotions",
                "I'm struggling with self-doubt",
                "Help me build better habits",
                "I feel disconnected from others",
            ],
            Mode::Productivity => &[
                "Help me set achievable daily goals",
                "I'm procrastinating on important tasks",
                "How can I manage my time better?",
                "I need motivation to stay focused",
                "Help me build productive routines",
            ],
            Mode::Mindfulness => &[
                "Teach me a breathing exercise",
                "Help me feel more grounded",
                "I need help managing anxiety",
                "Guide me through meditation",
                "I feel disconnected from the present",
            ],
            Mode::Motivation => &[
                "I need confidence for a challenge",
                "Help me overcome self-doubt",
                "I'm feeling stuck and unmotivated",
                "Remind me of my strengths",
                "I need encouragement to keep going",
            ],
            Mode::Anxiety => &[
                "I'm having anxious thoughts",
                "Help me with panic symptoms",
                "I'm worried about the future",
                "Teach me grounding techniques",
                "I need to calm my racing mind",
            ],
            Mode::Energy => &[
                "I'm always feeling tired",
                "How can I boost my energy naturally?",
                "Help me improve my sleep",
                "I need motivation to exercise",
                "My energy crashes in the afternoon",
            ],
        }
    }

    pub fn random_quick_prompt(&self) -> Option<&'static str> {
        self.quick_prompts()
            .choose(&mut rand::thread_rng())
            .copied()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
