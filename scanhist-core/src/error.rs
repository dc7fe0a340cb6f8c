/// Shown when a failure carries no usable message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch scans";

/// A failed page fetch.
///
/// Network errors, non-success statuses and malformed bodies all collapse
/// into this one kind; the only thing surfaced to the user is the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.user_message())]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message to show, falling back to [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> &str {
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            FALLBACK_ERROR_MESSAGE
        } else {
            trimmed
        }
    }
}
