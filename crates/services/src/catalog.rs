//! Static response catalog used when remote generation is unavailable.
//!
//! Responses are indexed by mode, then by [`Category`]. Modes without their
//! own table (anxiety, energy) read from the general table.

use rand::seq::SliceRandom;
use rand::Rng;
use shared::mode::Mode;

use crate::classifier::{classify, Category};

/// Short openers occasionally prepended to a fallback reply, including the
/// empty opener.
pub const EMPATHY_PREFIXES: &[&str] = &[
    "I hear you. ",
    "That sounds challenging. ",
    "I understand. ",
    "Thank you for sharing that with me. ",
    "",
];

/// Chance that a fallback reply gets an empathy prefix
pub const PREFIX_PROBABILITY: f64 = 0.3;

const GENERAL_STRESS: &[&str] = &[
    "I understand you're feeling stressed. Try this: Take 5 deep breaths, inhaling for 4 counts, holding for 4, and exhaling for 6. This activates your parasympathetic nervous system and helps calm your mind. Remember, stress is temporary, and you have the strength to get through this. 💙",
    "Stress can feel overwhelming, but you're not alone in this. Consider breaking down what's stressing you into smaller, manageable parts. Sometimes writing down your worries can help externalize them. Would you like to share what's specifically causing you stress today?",
    "When stress hits, remember the STOP technique: Stop what you're doing, Take a breath, Observe your thoughts and feelings, then Proceed mindfully. Your mental health matters, and it's okay to take breaks when you need them.",
    "Stress often comes from feeling out of control. Let's focus on what you can control right now. What's one small thing you could do today to take care of yourself? Even small acts of self-care can make a big difference.",
];

const GENERAL_OVERWHELMED: &[&str] = &[
    "Feeling overwhelmed is a sign that you're taking on a lot - that shows your dedication, but also means it's time to prioritize self-care. Try the 'One Thing' rule: focus on just one task at a time. What's the most important thing you could tackle right now?",
    "It's completely normal to feel overwhelmed sometimes. Let's break this down: What are the top 3 things on your mind right now? We can work through them one by one. Remember, you don't have to carry everything at once.",
    "When everything feels like too much, try this: Write down everything that's overwhelming you. Then circle just 3 things. Those are your priorities for today. Everything else can wait. You're doing better than you think.",
    "Overwhelm is your mind's way of saying 'I need a pause.' It's okay to slow down. What would it look like to be gentler with yourself right now?",
];

const GENERAL_MOTIVATION: &[&str] = &[
    "Motivation often comes after action, not before. Start with the smallest possible step - even 5 minutes of progress counts. What's one tiny action you could take today toward something important to you?",
    "Remember your 'why' - the deeper reason behind your goals. Motivation fluctuates, but purpose remains constant. You've overcome challenges before, and you have the strength to do it again. What matters most to you right now?",
    "Lack of motivation doesn't mean you're lazy - it often means you're tired, overwhelmed, or need a different approach. Be compassionate with yourself. What's one small step you could take without requiring much energy?",
    "Sometimes motivation comes from progress, not the other way around. Try doing something for just 10 minutes. Often, starting is the hardest part, and momentum builds naturally.",
];

const GENERAL_GENERAL: &[&str] = &[
    "I'm here to support you. Whatever you're going through, remember that it's okay to not be okay sometimes. Healing isn't linear, and you're doing the best you can with what you have right now.",
    "Your feelings are valid, and you deserve support. It takes courage to reach out, even to an AI. What's one thing that would make today a little bit better for you?",
    "Remember: you are more resilient than you know, more capable than you believe, and more valuable than you realize. What's something you're grateful for today, no matter how small?",
    "Every day you keep going is an act of courage. Be proud of yourself for making it this far. What would you like to focus on improving in your life right now?",
];

const GENERAL_SLEEP: &[&str] = &[
    "Sleep is so important for mental health. Try creating a wind-down routine: dim lights 1 hour before bed, avoid screens, try reading or gentle stretching. What's your biggest challenge with sleep right now?",
    "Poor sleep can affect everything - mood, focus, energy. Consider the 4-7-8 breathing technique before bed: inhale for 4, hold for 7, exhale for 8. This naturally prepares your body for rest.",
    "Sleep struggles are often connected to stress or racing thoughts. Try writing down your worries before bed - it helps get them out of your head and onto paper. Your mind needs permission to rest.",
];

const GENERAL_RELATIONSHIPS: &[&str] = &[
    "Relationships can be complex. Remember that you can only control your own actions and responses, not others'. What kind of support do you need in your relationships right now?",
    "Feeling lonely is painful, but you're not actually alone. Connection can start small - a text to a friend, a smile to a stranger, or even talking to yourself with kindness. You matter, and you deserve connection.",
    "Healthy relationships require boundaries, communication, and mutual respect. It's okay to step back from relationships that drain you and invest in those that lift you up.",
];

const PRODUCTIVITY_GOALS: &[&str] = &[
    "Great goals are SMART: Specific, Measurable, Achievable, Relevant, and Time-bound. Instead of 'exercise more,' try 'walk for 20 minutes, 3 times this week.' What specific goal would you like to set?",
    "Start with your long-term vision, then work backward. What do you want to achieve in 3 months? Now, what would you need to do this month? This week? Today? Breaking it down makes it manageable.",
    "The most important part of goal-setting is starting where you are, not where you think you should be. What's one small step you could take today toward your bigger goal?",
    "Goals should excite you, not exhaust you. If a goal feels overwhelming, make it smaller. Better to achieve small goals consistently than to abandon big ones. What goal would feel manageable right now?",
];

const PRODUCTIVITY_FOCUS: &[&str] = &[
    "Try the Pomodoro Technique: 25 minutes of focused work, then a 5-minute break. Remove distractions - put your phone in another room, close unnecessary tabs. Your brain needs single-tasking to perform its best.",
    "Focus issues often stem from decision fatigue. Simplify your environment: clear desk, minimal tabs open, and decide your top 3 priorities before you start. What's your biggest distraction right now?",
    "Your attention is like a muscle - it gets stronger with practice but needs rest too. If you can't focus, maybe you need a break, not more pressure. What would help you feel more centered right now?",
    "Focus follows energy. Are you trying to do complex work when your energy is low? Match your tasks to your energy levels throughout the day. When do you typically feel most alert?",
];

const PRODUCTIVITY_MOTIVATION: &[&str] = &[
    "Productivity isn't about being busy - it's about making progress on what matters. What's one thing that, if you accomplished it today, would make you feel proud?",
    "Motivation is overrated; systems are underrated. Instead of waiting to feel motivated, create a routine that doesn't depend on how you feel. What's one small habit you could automate?",
    "Sometimes the best productivity tool is rest. If you're constantly pushing yourself, burnout is inevitable. What's one way you could be more sustainable in your approach to work?",
    "Celebrate small wins! Your brain needs positive reinforcement to maintain motivation. What's something you accomplished recently that you can acknowledge and appreciate?",
];

const PRODUCTIVITY_PROCRASTINATION: &[&str] = &[
    "Procrastination often stems from perfectionism, overwhelm, or fear. What is it about this task that's making you avoid it? Sometimes naming the resistance helps dissolve it.",
    "Try the 2-minute rule: if something takes less than 2 minutes, do it now. For bigger tasks, commit to just 2 minutes of work. Often, starting is the hardest part.",
    "Procrastination is often your brain's way of protecting you from something - failure, judgment, or overwhelm. Be gentle with yourself and ask: what support do you need to move forward?",
    "Break the task into the smallest possible steps. Instead of 'write report,' try 'open document' or 'write one sentence.' Make the first step so small it feels silly not to do it.",
];

const MINDFULNESS_BREATHING: &[&str] = &[
    "Let's try the 4-7-8 breathing technique: Inhale through your nose for 4 counts, hold for 7, exhale through your mouth for 8. Repeat 3-4 times. This naturally calms your nervous system. How are you feeling?",
    "Here's a simple mindfulness exercise: Notice 5 things you can see, 4 things you can touch, 3 things you can hear, 2 things you can smell, and 1 thing you can taste. This grounds you in the present moment.",
    "Box breathing is great for anxiety: Inhale for 4, hold for 4, exhale for 4, hold for 4. Imagine tracing the sides of a box as you breathe. Your breath is always available to anchor you.",
    "Try belly breathing: Place one hand on your chest, one on your belly. Breathe so that the belly hand moves more than the chest hand. This activates your body's relaxation response.",
];

const MINDFULNESS_MINDFULNESS: &[&str] = &[
    "Mindfulness is about awareness without judgment. Right now, simply notice: How is your breathing? What do you feel in your body? What thoughts are present? Just observe, don't try to change anything.",
    "Try this: Set a gentle timer for 5 minutes. Sit comfortably and focus on your breath. When your mind wanders (it will!), gently return to your breath. Each return is a moment of mindfulness, not a failure.",
    "Mindfulness can be practiced anywhere: mindful eating (taste your food), mindful walking (feel your feet), mindful listening (really hear the sounds around you). What daily activity could you approach more mindfully?",
    "The goal isn't to empty your mind - it's to notice what's there without getting swept away. Your thoughts are like clouds passing through the sky of your awareness. What do you notice right now?",
];

const MINDFULNESS_PRESENT: &[&str] = &[
    "The present moment is the only moment where life actually happens. The past is memory, the future is imagination, but this moment is real. Take a deep breath and notice: what's happening right now?",
    "When your mind is elsewhere, try this: Name 3 things you can see right now. Really look at them. This simple practice brings you back to the present moment where peace lives.",
    "Anxiety lives in the future, depression in the past, but peace exists in the present. You don't have to solve everything right now - you just have to be here right now. How does that feel?",
    "Present-moment awareness is like a muscle - it gets stronger with practice. Every time you notice your mind has wandered and bring it back, you're building your awareness. That's the practice.",
];

const MOTIVATION_CONFIDENCE: &[&str] = &[
    "Confidence grows through action. Think of one small thing you accomplished recently - even getting out of bed counts! Acknowledge these wins, no matter how small. What's something you're proud of from this week?",
    "You are more resilient than you realize. Think of a challenge you've overcome before - you found a way through it. That same strength is still within you now. What helped you succeed in the past?",
    "Confidence isn't about feeling fearless - it's about acting despite the fear. Every time you do something that scares you a little, you build confidence. What's one small brave thing you could do today?",
    "Self-doubt is normal, but don't let it drive the car. You've succeeded before, learned before, grown before. Trust in your ability to figure things out as you go. What evidence do you have of your own capability?",
];

const MOTIVATION_EXERCISE: &[&str] = &[
    "Start with just 10 minutes - a walk around the block, stretching, or dancing to your favorite song. Movement doesn't have to be perfect to be beneficial. What type of movement sounds most appealing to you today?",
    "Exercise is a gift to your future self. It boosts mood, energy, and confidence. Start where you are: if you haven't moved in a while, gentle stretching counts. What's one way you could move your body today?",
    "The best workout is the one you'll actually do. Forget perfect routines - what kind of movement brings you joy? Dancing, walking, yoga, sports? Start with what feels good to you.",
    "Movement is medicine for both body and mind. Even 5 minutes of movement can shift your energy and mood. What's the smallest step you could take toward being more active today?",
];

const MOTIVATION_ENERGY: &[&str] = &[
    "Energy comes from alignment - doing things that matter to you, getting enough rest, nourishing your body, and connecting with others. Which area might need some attention in your life right now?",
    "Low energy often signals a need for rest, not more pushing. Are you honoring your need for downtime? Sometimes the most productive thing you can do is rest. How is your energy right now?",
    "Energy is renewable, but it requires conscious management. What activities give you energy vs. drain it? How can you do more of what energizes you and less of what depletes you?",
    "Physical energy affects mental energy. Are you eating regularly, staying hydrated, and getting enough sleep? These basics are the foundation of sustained motivation and focus.",
];

/// The table a mode reads from
fn table_for(mode: Mode) -> Mode {
    match mode {
        Mode::General | Mode::Productivity | Mode::Mindfulness | Mode::Motivation => mode,
        Mode::Anxiety | Mode::Energy => Mode::General,
    }
}

/// Exact lookup of a (table, category) pair, without any defaulting.
pub fn lookup(mode: Mode, category: Category) -> Option<&'static [&'static str]> {
    let list = match (table_for(mode), category) {
        (Mode::General, Category::Stress) => GENERAL_STRESS,
        (Mode::General, Category::Overwhelmed) => GENERAL_OVERWHELMED,
        (Mode::General, Category::Motivation) => GENERAL_MOTIVATION,
        (Mode::General, Category::General) => GENERAL_GENERAL,
        (Mode::General, Category::Sleep) => GENERAL_SLEEP,
        (Mode::General, Category::Relationships) => GENERAL_RELATIONSHIPS,

        (Mode::Productivity, Category::Goals) => PRODUCTIVITY_GOALS,
        (Mode::Productivity, Category::Focus) => PRODUCTIVITY_FOCUS,
        (Mode::Productivity, Category::Motivation) => PRODUCTIVITY_MOTIVATION,
        (Mode::Productivity, Category::Procrastination) => PRODUCTIVITY_PROCRASTINATION,

        (Mode::Mindfulness, Category::Breathing) => MINDFULNESS_BREATHING,
        (Mode::Mindfulness, Category::Mindfulness) => MINDFULNESS_MINDFULNESS,
        (Mode::Mindfulness, Category::Present) => MINDFULNESS_PRESENT,

        (Mode::Motivation, Category::Confidence) => MOTIVATION_CONFIDENCE,
        (Mode::Motivation, Category::Exercise) => MOTIVATION_EXERCISE,
        (Mode::Motivation, Category::Energy) => MOTIVATION_ENERGY,

        _ => return None,
    };
    Some(list)
}

/// Resolve the response list for a mode and category.
///
/// Order: the exact pair; for [`Category::General`] the general table's
/// `general` list; the mode table's `stress` list; the general `stress` list.
/// Never empty.
pub fn resolve(mode: Mode, category: Category) -> &'static [&'static str] {
    lookup(mode, category)
        .or_else(|| (category == Category::General).then_some(GENERAL_GENERAL))
        .or_else(|| lookup(mode, Category::Stress))
        .unwrap_or(GENERAL_STRESS)
}

/// Pick a canned reply for `message` using the thread-local RNG.
pub fn fallback_response(message: &str, mode: Mode) -> String {
    fallback_response_with(message, mode, &mut rand::thread_rng())
}

pub fn fallback_response_with<R: Rng>(message: &str, mode: Mode, rng: &mut R) -> String {
    let category = classify(message);
    let responses = resolve(mode, category);
    let reply = responses.choose(rng).copied().unwrap_or(GENERAL_STRESS[0]);

    let prefix = if rng.gen_bool(PREFIX_PROBABILITY) {
        EMPATHY_PREFIXES.choose(rng).copied().unwrap_or("")
    } else {
        ""
    };

    tracing::debug!(mode = %mode, category = %category, "Using catalog response");
    format!("{}{}", prefix, reply)
}

/// Strip a known empathy prefix, returning the bare catalog entry.
pub fn strip_prefix(reply: &str) -> &str {
    EMPATHY_PREFIXES
        .iter()
        .filter(|p| !p.is_empty())
        .find_map(|p| reply.strip_prefix(p))
        .unwrap_or(reply)
}
