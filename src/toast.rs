//! Transient notifications.
//!
//! Each toast carries its own deadline, fixed when it is created.  Nothing is
//! scheduled: expired toasts are dropped whenever the tray is touched, so a
//! torn-down client leaves no timers behind.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::observability::TOASTS;

/// How long a toast stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Severity of a toast, which selects its colour and icon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// An action succeeded.
    Success,
    /// An action failed.
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Monotonically increasing per tray; lets renderers tell toasts apart.
    pub id: u64,
    /// Text shown to the user.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// When the toast was raised.
    pub created_at: Instant,
}

impl Toast {
    /// The instant at which this toast disappears.
    pub fn expires_at(&self) -> Instant {
        self.created_at + TOAST_LIFETIME
    }

    /// Returns true if the toast is still showing at `now`.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}

/// Toasts in arrival order.
#[derive(Debug, Default)]
pub struct ToastTray {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastTray {
    /// Creates an empty tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises a toast created at `now` and returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.prune(now);
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            created_at: now,
        });
        TOASTS.click();
        id
    }

    /// Drops every toast whose lifetime has elapsed at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.is_visible_at(now));
    }

    /// Toasts visible at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        self.toasts
            .iter()
            .filter(|t| t.is_visible_at(now))
            .cloned()
            .collect()
    }

    /// Number of toasts held, including any not yet pruned.
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns true if the tray holds nothing.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
