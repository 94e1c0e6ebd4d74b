//! Outbound replies to inbox messages.
//!
//! The dashboard does not speak SMTP. Replies go through a transport
//! trait so the TUI can run against the simulated backend while a real
//! mail relay can slot in behind the same interface.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ReplyError>;
}

/// Completes every send after a fixed delay, mimicking network latency.
#[derive(Debug, Clone)]
pub struct SimulatedReplyTransport {
    latency: Duration,
}

impl SimulatedReplyTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedReplyTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl ReplyTransport for SimulatedReplyTransport {
    async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<(), ReplyError> {
        if body.trim().is_empty() {
            return Err(ReplyError::Rejected("empty reply body".into()));
        }
        tokio::time::sleep(self.latency).await;
        log::info!("Simulated reply delivered to {}", to);
        Ok(())
    }
}
