use tracing::warn;

/// Passive sink for user-facing failure notifications (the "toast").
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        warn!(message, "scan list error");
    }
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn error(&self, message: &str) {
        self(message);
    }
}
