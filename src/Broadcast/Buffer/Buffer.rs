// This is the per-consumer delivery buffer of the broadcast queue

use crate::Broadcast::ClientId;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Default initial capacity of a freshly registered buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 16;

/// The mutable part of a buffer, always accessed under `ConsumerBuffer::state`.
pub(crate) struct BufferState<T> {
    /// Pending values, oldest at the front.
    pub(crate) values: VecDeque<T>,

    /// Cleared exactly once, by cancellation. A dead buffer never accepts
    /// another value and never becomes live again.
    pub(crate) live: bool,
}

/// A single consumer's FIFO of undelivered values.
///
/// ### Concurrency Design:
/// - **Queue (push)**: the fan-out path appends under the buffer's own mutex,
///   never under the registry lock, then wakes one waiter.
/// - **Consumer (pop)**: the owning consumer pops under the same mutex and
///   parks on `ready` while the buffer is empty and live.
/// - **Cancel (close)**: flips `live` and notifies *all* waiters, so a thread
///   parked in a read observes cancellation instead of sleeping forever.
///
/// Each buffer has its own lock/condition pair, so appending to buffer A
/// never blocks a consumer draining buffer B.
pub(crate) struct ConsumerBuffer<T> {
    /// Identity of the consumer this buffer belongs to.
    pub(crate) owner: ClientId,

    pub(crate) state: Mutex<BufferState<T>>,

    /// Signalled on both "value pushed" and "cancelled".
    pub(crate) ready: Condvar,
}
