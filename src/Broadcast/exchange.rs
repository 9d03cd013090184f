use super::{ClientId, Consumer, Producer, Queue};
use crate::Core::{QueueError, Timeout};

/// A duplex endpoint: produces into one queue, consumes from another.
///
/// `Out` is the type this endpoint sends, `In` the type it receives. The two
/// queues may be the same queue, in which case the endpoint hears its own
/// values.
pub struct Exchange<Out, In = Out> {
    producer: Producer<Out>,
    consumer: Consumer<In>,
}

impl<Out, In> Exchange<Out, In> {
    /// Binds a new producer of `producer_queue` and a new consumer of
    /// `consumer_queue`.
    pub fn new(producer_queue: &Queue<Out>, consumer_queue: &Queue<In>) -> Result<Self, QueueError> {
        let producer = producer_queue.new_producer()?;
        let consumer = consumer_queue.new_consumer()?;
        Ok(Self::from_parts(producer, consumer))
    }

    pub fn from_parts(producer: Producer<Out>, consumer: Consumer<In>) -> Self {
        Self { producer, consumer }
    }

    /// Two endpoints wired crosswise: the first sends on `a` and hears `b`,
    /// the second sends on `b` and hears `a`.
    pub fn pair(a: &Queue<Out>, b: &Queue<In>) -> Result<(Self, Exchange<In, Out>), QueueError> {
        let left = Exchange::new(a, b)?;
        let right = Exchange::new(b, a)?;
        Ok((left, right))
    }

    pub fn consume(&self) -> Result<In, QueueError> {
        self.consumer.consume()
    }

    pub fn consume_timeout(&self, timeout: impl Into<Timeout>) -> Result<In, QueueError> {
        self.consumer.consume_timeout(timeout)
    }

    pub fn try_consume(&self) -> Result<Option<In>, QueueError> {
        self.consumer.try_consume()
    }

    /// Cancels the receiving side. Sending keeps working.
    pub fn cancel(&self) {
        self.consumer.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.consumer.is_cancelled()
    }

    pub fn producer(&self) -> &Producer<Out> {
        &self.producer
    }

    pub fn consumer(&self) -> &Consumer<In> {
        &self.consumer
    }

    /// (producer id, consumer id)
    pub fn ids(&self) -> (ClientId, ClientId) {
        (self.producer.id(), self.consumer.id())
    }

    pub fn into_parts(self) -> (Producer<Out>, Consumer<In>) {
        (self.producer, self.consumer)
    }
}

impl<Out: Clone, In> Exchange<Out, In> {
    pub fn produce(&self, value: Out) -> Result<(), QueueError> {
        self.producer.produce(value)
    }
}
