//! Widget timing configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_GREETING_DELAY_MS: u64 = 1000;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

pub const GREETING_DELAY_VAR: &str = "CHAT_GREETING_DELAY_MS";
pub const REPLY_DELAY_VAR: &str = "CHAT_REPLY_DELAY_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a whole number of milliseconds")]
    InvalidDuration { var: &'static str, value: String },
}

/// Simulated typing delays for the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Delay between the first opening and the greeting appearing.
    pub greeting_delay: Duration,
    /// Delay between a visitor message and the scripted reply.
    pub reply_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            greeting_delay: Duration::from_millis(DEFAULT_GREETING_DELAY_MS),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
        }
    }
}

impl WidgetConfig {
    /// Build typed widget config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_GREETING_DELAY_MS`: default 1000
    /// - `CHAT_REPLY_DELAY_MS`: default 1500
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if a variable is set but is
    /// not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            greeting_delay: env_duration_ms(GREETING_DELAY_VAR, DEFAULT_GREETING_DELAY_MS)?,
            reply_delay: env_duration_ms(REPLY_DELAY_VAR, DEFAULT_REPLY_DELAY_MS)?,
        })
    }

    /// Zero delays; replies settle on the next scheduler turn.
    #[must_use]
    pub fn instant() -> Self {
        Self { greeting_delay: Duration::ZERO, reply_delay: Duration::ZERO }
    }
}

fn env_duration_ms(var: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => parse_millis(var, &raw),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

fn parse_millis(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration { var, value: raw.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
