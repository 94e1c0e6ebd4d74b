//! Timed toast notifications shown in the top-right corner.

use std::time::{Duration, Instant};

/// Default lifetime for action confirmations.
pub const CONFIRM_TTL: Duration = Duration::from_millis(3000);
/// Settings saves clear a beat faster.
pub const SETTINGS_TTL: Duration = Duration::from_millis(2000);

/// At most this many toasts are rendered; older ones drop off first.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created: Instant,
    pub ttl: Duration,
}

impl Toast {
    fn new(message: impl Into<String>, level: ToastLevel, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
            ttl,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success, CONFIRM_TTL)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info, CONFIRM_TTL)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning, CONFIRM_TTL)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error, CONFIRM_TTL)
    }

    pub fn settings_saved() -> Self {
        Self::new("Settings saved", ToastLevel::Success, SETTINGS_TTL)
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.ttl
    }
}

/// Holds live toasts and expires them on each tick.
#[derive(Debug, Default)]
pub struct ToastCenter {
    toasts: Vec<Toast>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a toast, replacing an identical message instead of stacking it.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.retain(|t| t.message != toast.message);
        self.toasts.push(toast);
        let overflow = self.toasts.len().saturating_sub(MAX_VISIBLE);
        if overflow > 0 {
            self.toasts.drain(..overflow);
        }
    }

    pub fn dismiss_expired(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.expired_at(now));
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
