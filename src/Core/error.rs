use thiserror::Error;

/// Errors surfaced by queue handles.
///
/// `Producer::produce` returns `Result` even though no variant applies to it
/// today; a closed-queue condition would land here without changing callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QueueError {
    /// The consumer was cancelled (or was never registered with this queue).
    #[error("consumer cancelled")]
    ConsumerCancelled,
    /// A bounded consume gave up before a value arrived.
    #[error("consume timed out")]
    Timeout,
}

impl QueueError {
    /// True for the terminal cancellation error; a timeout may be retried.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueueError::ConsumerCancelled)
    }
}
