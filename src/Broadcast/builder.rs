use super::Buffer::Buffer::DEFAULT_BUFFER_CAPACITY;
use super::Queue;
use crate::Core::Timeout;

/// Configuration for a [`Queue`].
pub struct QueueBuilder {
    name: String,
    buffer_capacity: usize,
    default_timeout: Timeout,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            name: "queue".to_string(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            default_timeout: Timeout::Infinite, // Blocking reads wait until data or cancel
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label used in log output and `Debug` representations.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Initial capacity of every consumer buffer. Buffers still grow past it;
    /// this only avoids early reallocations.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Timeout applied by [`Consumer::consume`](super::Consumer::consume).
    pub fn with_default_timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.default_timeout = timeout.into();
        self
    }

    pub fn build<T>(self) -> Queue<T> {
        Queue::from_builder(self.name, self.buffer_capacity, self.default_timeout)
    }
}
