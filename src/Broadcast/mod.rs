mod builder;
mod consumer;
mod debug;
mod exchange;
mod producer;
mod queue;

pub use builder::QueueBuilder;
pub use consumer::{CancelHandle, Consumer};
pub use exchange::Exchange;
pub use producer::Producer;
pub use queue::{ClientId, Queue};

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub(crate) use Buffer::ConsumerBuffer; // re-export for stable path
}
