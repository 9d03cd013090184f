//! Connector domain data: users, permissions and the messages exchanged
//! between a chat connection, the connector and bot dispatchers.
//!
//! These are plain values. The queue treats them as opaque payloads.

pub mod command;
pub mod messages;
pub mod permission;
pub mod user;

pub use command::Command;
pub use messages::{
    ChatMessage, ClientMessage, CommandMessage, ConfirmationMessage, RegistrationMessage, ServerMessage,
    UserEvent, UserEventKind,
};
pub use permission::Permission;
pub use user::{sort_by_join_time, User, UserRole};
