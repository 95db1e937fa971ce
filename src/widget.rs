//! Chat widget driver — session transitions plus simulated latency.
//!
//! ARCHITECTURE
//! ============
//! `ChatWidget` wraps a [`ChatSession`] and turns its pending greeting and
//! replies into spawned tasks that await a [`Delay`] and then settle the
//! transition. Renderers subscribe to a broadcast of [`WidgetEvent`]s.
//!
//! TRADE-OFFS
//! ==========
//! Timers are fire-and-forget: nothing cancels a scheduled greeting or reply,
//! closing the widget included. Submissions are not serialized, so replies
//! land in whatever order their timers fire. With a single reply delay that
//! is submission order. `settle_all` waits for the composing counter to
//! drain, which is how a surface flushes pending replies before exiting.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::config::WidgetConfig;
use crate::delay::Delay;
use crate::session::{ChatEntry, ChatSession, PendingReply};

const EVENT_CAPACITY: usize = 64;

// =============================================================================
// EVENTS
// =============================================================================

/// Change notifications for a rendering surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    Opened,
    Closed,
    /// The assistant started or stopped "typing". `quick_replies` carries
    /// whether the shortcut menu is offered in the state that produced it.
    Composing { active: bool, quick_replies: bool },
    /// A new entry was appended to the log.
    Appended(ChatEntry),
}

// =============================================================================
// WIDGET
// =============================================================================

/// One chat widget instance. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct ChatWidget {
    id: Uuid,
    config: WidgetConfig,
    session: Arc<Mutex<ChatSession>>,
    rng: Arc<Mutex<StdRng>>,
    delay: Arc<dyn Delay>,
    events: broadcast::Sender<WidgetEvent>,
}

impl ChatWidget {
    #[must_use]
    pub fn new(config: WidgetConfig, delay: impl Delay, rng: StdRng) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id: Uuid::new_v4(),
            config,
            session: Arc::new(Mutex::new(ChatSession::new())),
            rng: Arc::new(Mutex::new(rng)),
            delay: Arc::new(delay),
            events,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    /// Copy of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> ChatSession {
        self.lock_session().clone()
    }

    /// Open the widget. Returns the greeting task on the first opening.
    pub fn open(&self) -> Option<JoinHandle<()>> {
        let (scheduled, started) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let mut session = self.lock_session();
            let was_composing = session.is_composing();
            let scheduled = session.open_widget(&mut *rng).is_some();
            (scheduled, !was_composing && session.is_composing())
        };
        debug!(session = %self.id, "widget opened");
        self.emit(WidgetEvent::Opened);
        if !scheduled {
            return None;
        }
        if started {
            self.emit(WidgetEvent::Composing { active: true, quick_replies: false });
        }
        Some(self.schedule_greeting())
    }

    /// Close the widget. Pending timers keep running.
    pub fn close(&self) {
        self.lock_session().close_widget();
        debug!(session = %self.id, "widget closed");
        self.emit(WidgetEvent::Closed);
    }

    /// Launcher button: close if open, open otherwise.
    pub fn toggle(&self) -> Option<JoinHandle<()>> {
        if self.lock_session().is_open() {
            self.close();
            None
        } else {
            self.open()
        }
    }

    /// Submit visitor text. Blank text is ignored and returns `None`.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        self.accept(|session| session.submit_text(text))
    }

    /// Submit the quick reply at zero-based `index`.
    pub fn quick_reply(&self, index: usize) -> Option<JoinHandle<()>> {
        self.accept(|session| session.submit_quick_reply(index))
    }

    /// Wait until every scheduled greeting and reply has been appended.
    ///
    /// Returns immediately when nothing is composing. A greeting timer that
    /// became a no-op after being flushed is not waited for.
    pub async fn settle_all(&self) {
        let mut events = self.subscribe();
        while self.is_composing() {
            match events.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!(session = %self.id, "all pending replies settled");
    }

    fn accept(&self, submit: impl FnOnce(&mut ChatSession) -> Option<PendingReply>) -> Option<JoinHandle<()>> {
        let (pending, entry, started) = {
            let mut session = self.lock_session();
            let was_composing = session.is_composing();
            let pending = submit(&mut session)?;
            let entry = session.log().last().cloned();
            (pending, entry, !was_composing)
        };
        info!(session = %self.id, topic = pending.topic.as_str(), "visitor message accepted");
        if let Some(entry) = entry {
            self.emit(WidgetEvent::Appended(entry));
        }
        if started {
            self.emit(WidgetEvent::Composing { active: true, quick_replies: false });
        }
        Some(self.schedule_reply(pending))
    }

    fn schedule_greeting(&self) -> JoinHandle<()> {
        let widget = self.clone();
        let delay = self.config.greeting_delay;
        tokio::spawn(async move {
            widget.delay.wait(delay).await;
            widget.settle(ChatSession::deliver_greeting_entries);
        })
    }

    fn schedule_reply(&self, pending: PendingReply) -> JoinHandle<()> {
        let widget = self.clone();
        let delay = self.config.reply_delay;
        tokio::spawn(async move {
            widget.delay.wait(delay).await;
            widget.settle(|session| session.receive_reply_entries(pending));
        })
    }

    /// Apply a settling transition and publish what it appended.
    fn settle(&self, transition: impl FnOnce(&mut ChatSession) -> Vec<ChatEntry>) {
        let (appended, idle, quick_replies) = {
            let mut session = self.lock_session();
            let appended = transition(&mut session);
            (appended, !session.is_composing(), session.shows_quick_replies())
        };
        if appended.is_empty() {
            trace!(session = %self.id, "timer settled with nothing to append");
            return;
        }
        for entry in appended {
            debug!(session = %self.id, id = entry.id, "assistant entry appended");
            self.emit(WidgetEvent::Appended(entry));
        }
        if idle {
            self.emit(WidgetEvent::Composing { active: false, quick_replies });
        }
    }

    fn emit(&self, event: WidgetEvent) {
        if self.events.send(event).is_err() {
            trace!(session = %self.id, "no widget subscribers");
        }
    }

    fn is_composing(&self) -> bool {
        self.lock_session().is_composing()
    }

    fn lock_session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// SETTLING HELPERS
// =============================================================================

impl ChatSession {
    fn deliver_greeting_entries(&mut self) -> Vec<ChatEntry> {
        self.deliver_greeting().cloned().into_iter().collect()
    }

    fn receive_reply_entries(&mut self, pending: PendingReply) -> Vec<ChatEntry> {
        let before = self.log().len();
        self.receive_reply(pending);
        self.log()[before..].to_vec()
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
