//! # portfolio-chat
//!
//! Scripted chat widget for a personal portfolio page. The reply tables live
//! in the `responder` crate; this crate owns the per-widget session state,
//! the simulated typing delays, transcript export, and a terminal surface
//! used by the `portfolio-chat` binary.

pub mod config;
pub mod console;
pub mod delay;
pub mod session;
pub mod transcript;
pub mod widget;

pub use config::{ConfigError, WidgetConfig};
pub use session::{ChatEntry, ChatSession, Origin, PendingReply};
pub use widget::{ChatWidget, WidgetEvent};
