// In src/Broadcast/producer.rs
use super::{ClientId, Queue};
use crate::Core::QueueError;

/// A producer for broadcasting values through a [`Queue`].
///
/// The producer carries nothing but its identity and a handle to the queue.
/// Any number of producers may call [`produce`](Producer::produce)
/// concurrently; the queue serializes them against registration changes.
pub struct Producer<T> {
    queue: Queue<T>,
    id: ClientId,
}

impl<T> Producer<T> {
    pub(crate) fn new(queue: Queue<T>, id: ClientId) -> Self {
        Self { queue, id }
    }

    /// Returns the identity of this producer
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the queue this producer writes to
    pub fn queue(&self) -> &Queue<T> {
        &self.queue
    }
}

impl<T: Clone> Producer<T> {
    /// Delivers `value` to every consumer registered at the time of the call.
    ///
    /// Values from one producer reach each consumer in the order they were
    /// produced. No ordering is promised between different producers.
    ///
    /// # Returns
    /// * `Ok(())` always; the error slot is reserved for a future closed queue
    pub fn produce(&self, value: T) -> Result<(), QueueError> {
        self.queue.inner.produce(self.id, value)
    }
}
