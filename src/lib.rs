// Module naming follows project convention (Broadcast = fan-out queue core)
#[allow(non_snake_case)]
pub mod Broadcast;
#[allow(non_snake_case)]
pub mod Core;
#[allow(non_snake_case)]
pub mod Command;
#[allow(non_snake_case)]
pub mod Domain;
#[allow(non_snake_case)]
pub mod Registry;
#[allow(non_snake_case)]
pub mod Relay;
#[allow(non_snake_case)]
mod Debug;

pub use Broadcast::{CancelHandle, ClientId, Consumer, Exchange, Producer, Queue, QueueBuilder};
pub use Core::{init_tracing, QueueError, Timeout};
