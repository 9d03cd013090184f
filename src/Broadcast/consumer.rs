// src/Broadcast/consumer.rs

use std::sync::{Arc, Weak};

use super::queue::QueueInner;
use super::{ClientId, Queue};
use crate::Core::{QueueError, Timeout};

/// A consumer for receiving every value broadcast on a [`Queue`] after it
/// was registered.
///
/// The consumer owns one buffer inside the queue. Dropping the consumer
/// cancels it, which removes the buffer and discards anything still unread.
pub struct Consumer<T> {
    queue: Queue<T>,
    id: ClientId,
}

/// Cancels one consumer from any thread without owning it.
///
/// The handle does not keep the queue alive; cancelling after the queue is
/// gone is a no-op.
pub struct CancelHandle<T> {
    queue: Weak<QueueInner<T>>,
    id: ClientId,
}

impl<T> Consumer<T> {
    pub(crate) fn new(queue: Queue<T>, id: ClientId) -> Self {
        Self { queue, id }
    }

    /// Receives the oldest pending value, blocking until one is available.
    ///
    /// Waits according to the queue's default timeout, which is
    /// [`Timeout::Infinite`] unless configured on the builder.
    ///
    /// # Returns
    /// * `Ok(value)` once a value is available
    /// * `Err(QueueError::ConsumerCancelled)` if the consumer is or becomes cancelled
    /// * `Err(QueueError::Timeout)` if a configured default timeout elapses
    pub fn consume(&self) -> Result<T, QueueError> {
        self.queue.inner.consume(self.id, self.queue.inner.default_timeout)
    }

    /// Receives the oldest pending value, waiting at most `timeout`.
    ///
    /// A timeout leaves the consumer registered; later reads still work.
    pub fn consume_timeout(&self, timeout: impl Into<Timeout>) -> Result<T, QueueError> {
        self.queue.inner.consume(self.id, timeout.into())
    }

    /// Receives a value if one is already pending.
    ///
    /// # Returns
    /// * `Ok(Some(value))` if a value was pending
    /// * `Ok(None)` if the buffer is empty
    /// * `Err(QueueError::ConsumerCancelled)` once cancelled
    pub fn try_consume(&self) -> Result<Option<T>, QueueError> {
        self.queue.inner.try_consume(self.id)
    }

    /// Unregisters this consumer and wakes any thread blocked in a read.
    /// Calling it again is a no-op.
    pub fn cancel(&self) {
        self.queue.inner.cancel(self.id);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.queue.inner.is_registered(self.id)
    }

    /// Number of values waiting in this consumer's buffer
    pub fn pending(&self) -> usize {
        self.queue.inner.pending(self.id)
    }

    /// Returns the identity of this consumer
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// A handle that can cancel this consumer from another thread.
    pub fn cancel_handle(&self) -> CancelHandle<T> {
        CancelHandle {
            queue: Arc::downgrade(&self.queue.inner),
            id: self.id,
        }
    }
}

impl<T> Drop for Consumer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> CancelHandle<T> {
    pub fn cancel(&self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.cancel(self.id);
        }
    }

    /// Identity of the consumer this handle cancels
    pub fn id(&self) -> ClientId {
        self.id
    }
}

impl<T> Clone for CancelHandle<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Weak::clone(&self.queue),
            id: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Broadcast::QueueBuilder;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn drop_cancels() {
        let q: Queue<u32> = Queue::new();
        let c = q.new_consumer().unwrap();
        assert_eq!(q.consumer_count(), 1);
        drop(c);
        assert_eq!(q.consumer_count(), 0);
    }

    #[test]
    fn cancel_handle_wakes_blocked_consume() {
        let q: Queue<u32> = Queue::new();
        let c = q.new_consumer().unwrap();
        let handle = c.cancel_handle();
        let reader = thread::spawn(move || c.consume());
        thread::sleep(Duration::from_millis(50));
        handle.cancel();
        assert_eq!(reader.join().unwrap(), Err(QueueError::ConsumerCancelled));
    }

    #[test]
    fn cancel_handle_outliving_queue_is_harmless() {
        let q: Queue<u32> = Queue::new();
        let c = q.new_consumer().unwrap();
        let handle = c.cancel_handle();
        drop(c);
        drop(q);
        handle.cancel();
        handle.clone().cancel();
    }

    #[test]
    fn default_timeout_applies_to_consume() {
        let q: Queue<u32> = QueueBuilder::new()
            .with_default_timeout(Duration::from_millis(10))
            .build();
        let c = q.new_consumer().unwrap();
        assert_eq!(c.consume(), Err(QueueError::Timeout));
        assert!(!c.is_cancelled());
    }
}
