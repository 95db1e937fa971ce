//! Simulated typing latency.
//!
//! The widget never sleeps directly; it awaits a [`Delay`] so production can
//! use the tokio timer while tests settle replies immediately or drive a
//! paused tokio clock by hand.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Delay: Send + Sync + 'static {
    /// Resolve after `duration` has elapsed on this delay's clock.
    async fn wait(&self, duration: Duration);
}

/// Real timer backed by `tokio::time::sleep`.
///
/// Under `tokio::time::pause()` this follows the virtual clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Ignores the requested duration and only yields to the scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

#[async_trait]
impl Delay for Immediate {
    async fn wait(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
#[path = "delay_test.rs"]
mod tests;
