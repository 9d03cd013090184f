pub mod error;
pub mod timeout;
pub mod trace;

pub use error::QueueError;
pub use timeout::Timeout;
pub use trace::init_tracing;
