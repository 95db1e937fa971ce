//! Terminal surface for the chat widget: input commands and output lines.
//!
//! SYSTEM CONTEXT
//! ==============
//! The binary reads stdin line by line and maps each line to a [`Command`].
//! Widget events are rendered to plain text lines here so formatting can be
//! tested without a terminal.

use std::path::Path;

use responder::QUICK_REPLIES;
use tracing::info;

use crate::session::{ChatEntry, Origin};
use crate::transcript::{self, TranscriptError};
use crate::widget::{ChatWidget, WidgetEvent};

pub const HELP: &str = "commands: /open /close /toggle /quick <1-3> /log /help /quit; anything else is sent as a message";

/// One line of console input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Toggle,
    /// Zero-based quick reply index.
    Quick(usize),
    Log,
    Help,
    Quit,
    /// Free text for the assistant, untrimmed.
    Say(String),
    /// A slash command that could not be understood.
    Unknown(String),
}

/// Parse a console line. Lines not starting with `/` are messages.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Say(line.to_owned());
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("open"), None, None) => Command::Open,
        (Some("close"), None, None) => Command::Close,
        (Some("toggle"), None, None) => Command::Toggle,
        (Some("log"), None, None) => Command::Log,
        (Some("help"), None, None) => Command::Help,
        (Some("quit" | "exit"), None, None) => Command::Quit,
        (Some("quick"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if (1..=QUICK_REPLIES.len()).contains(&n) => Command::Quick(n - 1),
            _ => Command::Unknown(trimmed.to_owned()),
        },
        _ => Command::Unknown(trimmed.to_owned()),
    }
}

/// Format one log entry as a console line.
#[must_use]
pub fn format_entry(entry: &ChatEntry) -> String {
    match entry.origin {
        Origin::User => format!("you › {}", entry.text),
        Origin::Assistant => format!("assistant › {}", entry.text),
    }
}

/// Quick-reply menu line, numbered from 1.
#[must_use]
pub fn format_quick_replies() -> String {
    QUICK_REPLIES
        .iter()
        .enumerate()
        .map(|(i, q)| format!("[{}] {q}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render a widget event. Returns the lines to print, possibly none.
#[must_use]
pub fn render_event(event: &WidgetEvent) -> Vec<String> {
    match event {
        WidgetEvent::Opened => vec!["(chat open)".to_owned()],
        WidgetEvent::Closed => vec!["(chat closed)".to_owned()],
        WidgetEvent::Composing { active: true, .. } => vec!["assistant is typing…".to_owned()],
        WidgetEvent::Composing { active: false, quick_replies: true } => vec![format_quick_replies()],
        WidgetEvent::Composing { active: false, quick_replies: false } => Vec::new(),
        WidgetEvent::Appended(entry) => vec![format_entry(entry)],
    }
}

// =============================================================================
// SHUTDOWN
// =============================================================================

/// End a console session: let every pending greeting and reply land, then
/// export the log when a transcript path was given.
pub async fn shut_down(widget: &ChatWidget, transcript: Option<&Path>) -> Result<(), TranscriptError> {
    widget.settle_all().await;
    if let Some(path) = transcript {
        transcript::write_json_lines(widget.snapshot().log(), path)?;
        info!(session = %widget.id(), path = %path.display(), "transcript written");
    }
    Ok(())
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
