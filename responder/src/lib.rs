//! Scripted reply tables for the portfolio chat widget.
//!
//! This crate owns every literal the assistant can say: the opening
//! greetings, the keyword table used to answer visitor messages, and the
//! quick-reply shortcuts offered after the greeting. It has no notion of
//! sessions, timers, or rendering so both the session engine and any UI
//! surface can share it.
//!
//! MATCHING
//! ========
//! Visitor text is lower-cased and tested for plain substring containment
//! against each rule in priority order. The first rule with any matching
//! trigger wins, so "hi, tell me about projects" is an introduction, not a
//! greeting or a project pointer. Substring semantics are deliberate and
//! loose: "hi" also matches "this".

use rand::Rng;
use serde::{Deserialize, Serialize};

// =============================================================================
// GREETINGS
// =============================================================================

/// Opening greetings, one of which is drawn when the widget first opens.
pub const GREETINGS: [&str; 3] = [
    "Hey there! 👋 I'm Alex's AI assistant. How can I help you today?",
    "Welcome! Looking for something specific? I'd love to help!",
    "Hi! Curious about Alex's work? Ask me anything!",
];

/// Draw an opening greeting uniformly at random from [`GREETINGS`].
///
/// The caller owns the "already greeted" bookkeeping; this function has no
/// side effects beyond advancing `rng`.
pub fn select_greeting<R: Rng>(rng: &mut R) -> &'static str {
    GREETINGS[rng.random_range(0..GREETINGS.len())]
}

// =============================================================================
// QUICK REPLIES
// =============================================================================

/// One-tap suggestions shown under the greeting. Each is submitted verbatim.
pub const QUICK_REPLIES: [&str; 3] = ["Tell me about Alex", "View projects", "Get in touch"];

/// Look up a quick reply by zero-based position.
#[must_use]
pub fn quick_reply(index: usize) -> Option<&'static str> {
    QUICK_REPLIES.get(index).copied()
}

// =============================================================================
// TOPICS
// =============================================================================

/// Reply category selected by the keyword table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Who Alex is.
    Introduction,
    /// Pointer to the projects section.
    Projects,
    /// How to get in contact.
    Contact,
    /// Small-talk greeting.
    Greeting,
    /// Nothing matched.
    Fallback,
}

impl Topic {
    /// Canned reply text for this topic.
    #[must_use]
    pub fn reply(self) -> &'static str {
        match self {
            Self::Introduction => {
                "Alex is a passionate AI developer and designer with 5+ years of experience. They specialize in creating intelligent, beautiful digital experiences that blend cutting-edge AI with thoughtful design! 🎨✨"
            }
            Self::Projects => {
                "Check out the Projects section to see Alex's latest work! From AI art generators to smart chatbot platforms, there's a lot of exciting stuff to explore. 🚀"
            }
            Self::Contact => {
                "You can reach Alex through the contact form below, or connect on social media. They typically respond within 24 hours! 📬"
            }
            Self::Greeting => "Hello! Nice to meet you! 😊 How can I assist you today?",
            Self::Fallback => {
                "That's a great question! Feel free to explore Alex's projects or reach out directly through the contact form. I'm here to help! 🤖"
            }
        }
    }

    /// Trigger substrings for this topic. Empty for [`Topic::Fallback`].
    #[must_use]
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            Self::Introduction => &["about", "alex", "tell me"],
            Self::Projects => &["project", "work", "portfolio"],
            Self::Contact => &["contact", "reach", "touch", "hire"],
            Self::Greeting => &["hello", "hi", "hey"],
            Self::Fallback => &[],
        }
    }

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::Greeting => "greeting",
            Self::Fallback => "fallback",
        }
    }
}

/// Keyword rules in evaluation order. Reordering changes behavior.
pub const RULES: [Topic; 4] = [Topic::Introduction, Topic::Projects, Topic::Contact, Topic::Greeting];

// =============================================================================
// MATCHING
// =============================================================================

/// Pick the reply topic for a visitor utterance.
///
/// Total over all strings; text with no matching trigger (including empty or
/// non-alphabetic text) falls through to [`Topic::Fallback`].
#[must_use]
pub fn classify(utterance: &str) -> Topic {
    let lower = utterance.to_lowercase();
    RULES
        .into_iter()
        .find(|topic| topic.triggers().iter().any(|t| lower.contains(t)))
        .unwrap_or(Topic::Fallback)
}

/// Canned reply for a visitor utterance.
#[must_use]
pub fn respond(utterance: &str) -> &'static str {
    classify(utterance).reply()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
