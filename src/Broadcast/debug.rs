use std::fmt;

use super::Buffer::ConsumerBuffer;
use super::{CancelHandle, Consumer, Exchange, Producer, Queue};
use crate::Debug::StructDebug;

// Debug proxy implementations that call the standalone debug functions.
// None of them require `T: Debug`; payloads are never printed.
impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_queue(self, f)
    }
}

impl<T> fmt::Debug for ConsumerBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_consumer_buffer(self, f)
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_producer(self, f)
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_consumer(self, f)
    }
}

impl<T> fmt::Debug for CancelHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_cancel_handle(self, f)
    }
}

impl<Out, In> fmt::Debug for Exchange<Out, In> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_exchange(self, f)
    }
}
