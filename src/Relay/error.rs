use thiserror::Error;

use crate::Core::QueueError;

#[derive(Debug, Error)]
pub enum RelayError {
    /// No builder is registered under this key.
    #[error("unknown relay {0:?}")]
    UnknownRelay(String),
    /// The local end was closed.
    #[error("relay closed")]
    Closed,
    /// An operation that needs `start`/`connect` ran before it.
    #[error("relay not started")]
    NotStarted,
    /// The peer sent something out of sequence.
    #[error("protocol violation: {0}")]
    Protocol(&'static str),
    /// A required configuration entry is missing or malformed.
    #[error("invalid relay config: {0}")]
    Config(String),
    #[error(transparent)]
    Queue(QueueError),
}

impl From<QueueError> for RelayError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::ConsumerCancelled => RelayError::Closed,
            other => RelayError::Queue(other),
        }
    }
}
