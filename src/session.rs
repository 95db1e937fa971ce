//! Chat widget session state.
//!
//! DESIGN
//! ======
//! All mutable widget state (open flag, greeting bookkeeping, conversation
//! log, composing counter) lives in one `ChatSession` value. Every change
//! goes through an explicit transition method, so the state machine can be
//! driven and inspected without timers or a renderer. Scheduling the
//! simulated delays is the caller's job (see `widget`).
//!
//! The greeting is drawn on the first opening but appended only when its
//! timer fires. If a reply settles first, the pending greeting is flushed
//! ahead of it, which keeps the greeting as the first assistant entry while
//! the log stays append-only. The later greeting timer is then a no-op.
//!
//! There is no way to reset the greeted flag or clear the log; a fresh
//! session is a fresh `ChatSession`.

use rand::Rng;
use responder::Topic;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// LOG ENTRIES
// =============================================================================

/// Who produced a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// A single conversation log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Monotonic per-session sequence number, starting at 1.
    pub id: u64,
    pub origin: Origin,
    pub text: String,
}

/// A reply chosen for an accepted submission, waiting for its delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub topic: Topic,
    pub text: &'static str,
}

// =============================================================================
// SESSION
// =============================================================================

/// State for one chat widget instance.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    open: bool,
    greeted: bool,
    pending_greeting: Option<&'static str>,
    log: Vec<ChatEntry>,
    composing: usize,
    next_id: u64,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Open the widget.
    ///
    /// On the first opening of the session this draws a greeting, enters the
    /// composing state, and returns the greeting so the caller can schedule
    /// [`ChatSession::deliver_greeting`]. Later openings return `None`.
    pub fn open_widget<R: Rng>(&mut self, rng: &mut R) -> Option<&'static str> {
        self.open = true;
        if self.greeted {
            return None;
        }
        let greeting = responder::select_greeting(rng);
        self.greeted = true;
        self.pending_greeting = Some(greeting);
        self.composing += 1;
        debug!(greeting, "greeting scheduled");
        Some(greeting)
    }

    /// Close the widget. Pending greetings and replies still settle.
    pub fn close_widget(&mut self) {
        self.open = false;
    }

    /// Flip the open flag, as the launcher button does.
    pub fn toggle_widget<R: Rng>(&mut self, rng: &mut R) -> Option<&'static str> {
        if self.open {
            self.close_widget();
            None
        } else {
            self.open_widget(rng)
        }
    }

    /// Append the pending greeting, if it has not been flushed already.
    ///
    /// Returns the appended entry, or `None` when there was nothing pending.
    pub fn deliver_greeting(&mut self) -> Option<&ChatEntry> {
        let greeting = self.pending_greeting.take()?;
        self.composing = self.composing.saturating_sub(1);
        Some(self.append(Origin::Assistant, greeting.to_owned()))
    }

    /// Accept visitor text.
    ///
    /// Blank or whitespace-only text is ignored and returns `None` without
    /// touching any state. Otherwise the trimmed text is logged, the session
    /// enters the composing state, and the scripted reply is returned for
    /// the caller to settle later via [`ChatSession::receive_reply`].
    pub fn submit_text(&mut self, raw: &str) -> Option<PendingReply> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let topic = responder::classify(text);
        self.append(Origin::User, text.to_owned());
        self.composing += 1;
        debug!(topic = topic.as_str(), "reply scheduled");
        Some(PendingReply { topic, text: topic.reply() })
    }

    /// Submit the quick reply at `index` exactly as if it had been typed.
    ///
    /// Only accepted while [`ChatSession::shows_quick_replies`] holds, i.e.
    /// under the lone greeting with nothing composing.
    pub fn submit_quick_reply(&mut self, index: usize) -> Option<PendingReply> {
        if !self.shows_quick_replies() {
            debug!(index, "quick reply rejected outside the greeting menu");
            return None;
        }
        let text = responder::quick_reply(index)?;
        self.submit_text(text)
    }

    /// Settle a pending reply: append it and leave the composing state.
    ///
    /// A greeting that is still pending is flushed first.
    pub fn receive_reply(&mut self, reply: PendingReply) -> &ChatEntry {
        if self.pending_greeting.is_some() {
            debug!("flushing greeting ahead of reply");
            self.deliver_greeting();
        }
        self.composing = self.composing.saturating_sub(1);
        self.append(Origin::Assistant, reply.text.to_owned())
    }

    fn append(&mut self, origin: Origin, text: String) -> &ChatEntry {
        self.next_id += 1;
        let index = self.log.len();
        self.log.push(ChatEntry { id: self.next_id, origin, text });
        &self.log[index]
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True once the greeting has been drawn. Never reset.
    #[must_use]
    pub fn greeted(&self) -> bool {
        self.greeted
    }

    /// True while any greeting or reply is waiting for its delay.
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.composing > 0
    }

    #[must_use]
    pub fn log(&self) -> &[ChatEntry] {
        &self.log
    }

    /// Quick replies show under the greeting until the visitor says anything.
    #[must_use]
    pub fn shows_quick_replies(&self) -> bool {
        self.log.len() == 1 && self.log[0].origin == Origin::Assistant && !self.is_composing()
    }

    /// The launcher badge shows until the greeting has actually appeared.
    #[must_use]
    pub fn shows_unread_badge(&self) -> bool {
        !self.open && !self.log.iter().any(|e| e.origin == Origin::Assistant)
    }

    /// Whether the send button is enabled for `draft`.
    #[must_use]
    pub fn can_send(&self, draft: &str) -> bool {
        !draft.trim().is_empty() && !self.is_composing()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
