//! Transient failure notice drawn over the bottom of the screen.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use scanhist_core::Notifier;

/// How long a toast stays up unless dismissed.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    raised_at: Instant,
}

/// Notifier that keeps the most recent message for the renderer.
///
/// Clones share the same slot, so the controller can own one while the
/// app reads from another.
#[derive(Debug, Clone, Default)]
pub struct ToastNotifier {
    slot: Arc<Mutex<Option<Toast>>>,
}

impl ToastNotifier {
    fn slot(&self) -> MutexGuard<'_, Option<Toast>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<Toast> {
        self.slot().clone()
    }

    /// Drop the toast once it is older than [`TOAST_TTL`].
    pub fn expire(&self, now: Instant) {
        let mut slot = self.slot();
        if slot
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.raised_at) >= TOAST_TTL)
        {
            *slot = None;
        }
    }

    pub fn dismiss(&self) {
        *self.slot() = None;
    }
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str) {
        *self.slot() = Some(Toast {
            message: message.to_string(),
            raised_at: Instant::now(),
        });
    }
}
