use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

use super::Buffer::ConsumerBuffer;
use super::{Consumer, Producer, QueueBuilder};
use crate::Core::trace::{debug, trace};
use crate::Core::{QueueError, Timeout};

/// Identity of a producer or consumer, unique for the lifetime of its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub(crate) u64);

impl ClientId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A broadcast queue: every value produced is delivered to every consumer
/// registered at that moment, each through its own FIFO buffer.
///
/// `Queue` is a cheap handle; clones share the same registry. Values must be
/// `Clone` to be fanned out; wrap large payloads in an `Arc`.
///
/// The queue is unbounded. A consumer that never reads grows its buffer
/// without limit, so callers either drain or cancel consumers they stop using.
pub struct Queue<T> {
    pub(crate) inner: Arc<QueueInner<T>>,
}

pub(crate) struct QueueInner<T> {
    pub(crate) name: String,
    pub(crate) buffer_capacity: usize,
    pub(crate) default_timeout: Timeout,

    /// Shared by producers and consumers; never rewinds, so ids are never reused.
    next_id: CachePadded<AtomicU64>,

    /// consumer id -> buffer. Held only to snapshot, insert or remove.
    registry: RwLock<HashMap<ClientId, Arc<ConsumerBuffer<T>>>>,
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// A queue with default settings. See [`QueueBuilder`] for options.
    pub fn new() -> Self {
        QueueBuilder::new().build()
    }

    pub(crate) fn from_builder(name: String, buffer_capacity: usize, default_timeout: Timeout) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                name,
                buffer_capacity,
                default_timeout,
                next_id: CachePadded::new(AtomicU64::new(0)),
                registry: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a producer. Producers hold no registry state.
    pub fn new_producer(&self) -> Result<Producer<T>, QueueError> {
        let id = self.inner.allocate_id();
        Ok(Producer::new(self.clone(), id))
    }

    /// Create and register a consumer with an empty buffer.
    ///
    /// Registration takes the registry write lock, so it is ordered entirely
    /// before or entirely after any concurrent `produce`.
    pub fn new_consumer(&self) -> Result<Consumer<T>, QueueError> {
        let id = self.inner.allocate_id();
        let buffer = Arc::new(ConsumerBuffer::new(id, self.inner.buffer_capacity));
        self.inner.registry.write().insert(id, buffer);
        debug!(queue = %self.inner.name, consumer = %id, "consumer registered");
        Ok(Consumer::new(self.clone(), id))
    }

    /// Number of currently registered (not cancelled) consumers.
    pub fn consumer_count(&self) -> usize {
        self.inner.registry.read().len()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn default_timeout(&self) -> Timeout {
        self.inner.default_timeout
    }
}

impl<T> QueueInner<T> {
    fn allocate_id(&self) -> ClientId {
        ClientId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn buffer(&self, id: ClientId) -> Option<Arc<ConsumerBuffer<T>>> {
        self.registry.read().get(&id).cloned()
    }

    /// Fan `value` out to every buffer registered right now.
    ///
    /// The registry lock is held only while the snapshot is taken; appends and
    /// wake-ups happen afterwards under each buffer's own lock. A buffer
    /// cancelled after the snapshot refuses the append.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) fn produce(&self, from: ClientId, value: T) -> Result<(), QueueError>
    where
        T: Clone,
    {
        let targets: Vec<Arc<ConsumerBuffer<T>>> = self.registry.read().values().cloned().collect();
        trace!(queue = %self.name, producer = %from, consumers = targets.len(), "fan-out");

        // Clone for all but the last buffer, which takes the value itself.
        if let Some((last, rest)) = targets.split_last() {
            for buffer in rest {
                buffer.push(value.clone());
            }
            last.push(value);
        }
        Ok(())
    }

    pub(crate) fn consume(&self, id: ClientId, timeout: Timeout) -> Result<T, QueueError> {
        let buffer = self.buffer(id).ok_or(QueueError::ConsumerCancelled)?;
        let result = buffer.pop(timeout.deadline());
        if matches!(result, Err(QueueError::Timeout)) {
            debug!(queue = %self.name, consumer = %id, "consume timed out");
        }
        result
    }

    pub(crate) fn try_consume(&self, id: ClientId) -> Result<Option<T>, QueueError> {
        self.buffer(id).ok_or(QueueError::ConsumerCancelled)?.try_pop()
    }

    /// Unregister a consumer. Idempotent; unknown ids are ignored.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) fn cancel(&self, id: ClientId) {
        let removed = self.registry.write().remove(&id);
        if let Some(buffer) = removed {
            let discarded = buffer.close();
            debug!(queue = %self.name, consumer = %buffer.owner, discarded, "consumer cancelled");
        }
    }

    pub(crate) fn pending(&self, id: ClientId) -> usize {
        self.buffer(id).map_or(0, |buffer| buffer.len())
    }

    pub(crate) fn is_registered(&self, id: ClientId) -> bool {
        self.buffer(id).is_some_and(|buffer| buffer.is_live())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_producers_and_consumers() {
        let q: Queue<u8> = Queue::new();
        let p = q.new_producer().unwrap();
        let c = q.new_consumer().unwrap();
        let p2 = q.new_producer().unwrap();
        let mut ids = vec![p.id(), c.id(), p2.id()];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn ids_are_not_reused_after_cancel() {
        let q: Queue<u8> = Queue::new();
        let first = q.new_consumer().unwrap();
        let first_id = first.id();
        first.cancel();
        drop(first);
        let second = q.new_consumer().unwrap();
        assert_ne!(second.id(), first_id);
        assert!(second.id() > first_id);
    }

    #[test]
    fn produce_without_consumers_is_ok() {
        let q: Queue<String> = Queue::new();
        let p = q.new_producer().unwrap();
        assert_eq!(p.produce("lost".to_string()), Ok(()));
        assert_eq!(q.consumer_count(), 0);
    }

    #[test]
    fn cancel_unregisters_and_unknown_ids_are_ignored() {
        let q: Queue<u8> = Queue::new();
        let c = q.new_consumer().unwrap();
        assert_eq!(q.consumer_count(), 1);
        q.inner.cancel(ClientId(999));
        assert_eq!(q.consumer_count(), 1);
        c.cancel();
        assert_eq!(q.consumer_count(), 0);
        assert_eq!(q.inner.consume(ClientId(999), Timeout::Infinite), Err(QueueError::ConsumerCancelled));
    }

    #[test]
    fn clones_share_the_registry() {
        let q: Queue<u8> = Queue::new();
        let q2 = q.clone();
        let c = q2.new_consumer().unwrap();
        q.new_producer().unwrap().produce(3).unwrap();
        assert_eq!(c.consume(), Ok(3));
    }
}
