use std::time::{Duration, Instant};

/// Timeout specification for blocking consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timeout {
    /// Wait until a value arrives or the consumer is cancelled.
    #[default]
    Infinite,
    /// Wait for at most the specified duration.
    Duration(Duration),
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl Timeout {
    /// Absolute deadline for a wait starting now.
    ///
    /// A duration too large to add to `Instant::now()` behaves as `Infinite`.
    pub(crate) fn deadline(self) -> Option<Instant> {
        match self {
            Timeout::Infinite => None,
            Timeout::Duration(d) => Instant::now().checked_add(d),
        }
    }
}
