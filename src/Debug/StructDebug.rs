use std::fmt;

use crate::Broadcast::Buffer::ConsumerBuffer;
use crate::Broadcast::{CancelHandle, Consumer, Exchange, Producer, Queue};

/// Debug function for Queue
///
/// Shows:
/// - Queue name
/// - Number of registered consumers
/// - Default consume timeout
pub fn debug_queue<T>(queue: &Queue<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Queue")
        .field("name", &queue.name())
        .field("consumers", &queue.consumer_count())
        .field("default_timeout", &queue.default_timeout())
        .finish()
}

/// Debug function for ConsumerBuffer
///
/// Never prints payloads, only their count and the liveness flag.
pub(crate) fn debug_consumer_buffer<T>(buffer: &ConsumerBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = buffer.state.lock();
    f.debug_struct("ConsumerBuffer")
        .field("owner", &buffer.owner)
        .field("pending", &state.values.len())
        .field("live", &state.live)
        .finish()
}

pub fn debug_producer<T>(producer: &Producer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Producer")
        .field("id", &producer.id())
        .field("queue", &producer.queue().name())
        .finish()
}

pub fn debug_consumer<T>(consumer: &Consumer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Consumer")
        .field("id", &consumer.id())
        .field("pending", &consumer.pending())
        .field("cancelled", &consumer.is_cancelled())
        .finish()
}

pub fn debug_cancel_handle<T>(handle: &CancelHandle<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CancelHandle")
        .field("id", &handle.id())
        .finish_non_exhaustive()
}

pub fn debug_exchange<Out, In>(exchange: &Exchange<Out, In>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Exchange")
        .field("producer", exchange.producer())
        .field("consumer", exchange.consumer())
        .finish()
}
