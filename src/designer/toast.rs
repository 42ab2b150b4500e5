use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a toast stays up unless closed by hand.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Toast severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Action completed.
    Success,
    /// Action failed.
    Error,
    /// Neutral notice.
    #[default]
    Info,
}

impl ToastKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    kind: ToastKind,
    message: String,
    duration: Duration,
    shown_at: Instant,
}

impl Toast {
    /// Toast shown now with the default duration.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
            shown_at: Instant::now(),
        }
    }

    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    /// Error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// Info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Override the display duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override when the toast was shown.
    pub fn shown_at(mut self, at: Instant) -> Self {
        self.shown_at = at;
        self
    }

    /// Severity.
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Time until auto-dismiss.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the toast should have auto-dismissed by `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }

    /// Whether the toast should have auto-dismissed by now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designer/toast.rs"]
mod tests;
