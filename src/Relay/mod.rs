//! Pluggable transports between a chat connection, the connector and bot
//! dispatchers.
//!
//! Concrete relays are built through a [`RelayRegistry`] that the
//! application constructs and passes around. [`loopback`] provides an
//! in-process connector/dispatcher pair backed by two broadcast queues.

mod error;
pub mod loopback;
mod registry;

pub use error::RelayError;
pub use registry::{
    ConnectionRelayBuilder, ConnectorRelayBuilder, DispatcherRelayBuilder, RelayConfig, RelayRegistry,
};

use std::time::SystemTime;

use crate::Domain::{ChatMessage, ClientMessage, ConfirmationMessage, RegistrationMessage, ServerMessage, User};
use crate::Registry::{ReadOnlyCommands, ReadOnlyUsers, UserList};

/// Callback for users joining or leaving the chat.
pub type UserCallback = Box<dyn Fn(&User, SystemTime) + Send + Sync>;

/// The connector's link to the chat service.
pub trait ConnectionRelay: Send {
    /// Joins the chat as `nick`; returns the connector's user and the users
    /// already online.
    fn connect(&mut self, nick: &str) -> Result<(User, UserList), RelayError>;
    fn recv(&self) -> Result<ChatMessage, RelayError>;
    fn send(&self, message: ClientMessage) -> Result<(), RelayError>;
    fn on_user_join(&mut self, callback: UserCallback);
    fn on_user_left(&mut self, callback: UserCallback);
}

/// Connector side of the connector/dispatcher link.
pub trait ConnectorRelay: Send {
    fn start(&mut self, bot_user: User, online_users: ReadOnlyUsers, trigger: &str) -> Result<(), RelayError>;
    /// Waits for the next dispatcher to register.
    fn accept(&mut self) -> Result<Box<dyn Dispatcher>, RelayError>;
    /// Next message sent by any dispatcher.
    fn recv(&self) -> Result<ClientMessage, RelayError>;
    fn done(&self) -> bool;
}

/// The connector's handle on one registered dispatcher.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, message: ServerMessage) -> Result<(), RelayError>;
    /// Commands the dispatcher announced at registration.
    fn commands(&self) -> ReadOnlyCommands;
    fn done(&self) -> bool;
}

/// Bot side of the connector/dispatcher link.
pub trait DispatcherRelay: Send {
    fn connect(&mut self, registration: RegistrationMessage) -> Result<ConfirmationMessage, RelayError>;
    fn send(&self, message: ClientMessage) -> Result<(), RelayError>;
    fn recv(&self) -> Result<ServerMessage, RelayError>;
    fn done(&self) -> bool;
}
