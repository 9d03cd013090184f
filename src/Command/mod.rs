//! Bot command plug-ins.
//!
//! A command is recognised by its name or an alias and may also watch chat
//! traffic and user events. Commands are collected in an explicit
//! [`CommandSet`] owned by the bot; nothing registers itself globally.

mod error;
mod set;

pub use error::CommandError;
pub use set::CommandSet;

use std::collections::HashMap;

use crate::Domain::{ChatMessage, ClientMessage, CommandMessage, Permission, User, UserEvent};
use crate::Registry::ReadOnlyUsers;

/// What a command may ask of the bot running it.
pub trait Executor {
    fn bot_user(&self) -> &User;
    fn api_keys(&self) -> &HashMap<String, String>;
    fn online_users(&self) -> ReadOnlyUsers;
    fn user_has_permission(&self, user: &User, permission: Permission) -> bool;
    fn trigger(&self) -> &str;
}

/// The invocable part of a command.
pub trait Executable: Send {
    /// Called once before the first invocation, with access to the bot.
    fn init(&mut self, _bot: &dyn Executor) -> Result<(), CommandError> {
        Ok(())
    }

    /// Unique lowercase alphanumeric name, `^[a-z][a-z0-9]*$`.
    fn name(&self) -> &str;

    /// Other names the command answers to, excluding `name`.
    fn aliases(&self) -> Vec<String> {
        Vec::new()
    }

    /// One-line usage shown in help listings.
    fn usage(&self) -> String {
        String::new()
    }

    fn execute(&mut self, command: &CommandMessage) -> Result<Vec<ClientMessage>, CommandError>;
}

/// Passive hooks. The defaults ignore everything.
pub trait Interceptor {
    fn on_chat(&mut self, _message: &ChatMessage) -> Result<Vec<ClientMessage>, CommandError> {
        Ok(Vec::new())
    }

    fn on_user_event(&mut self, _event: &UserEvent) -> Result<Vec<ClientMessage>, CommandError> {
        Ok(Vec::new())
    }

    /// Skip messages sent by the connector's own user.
    fn ignore_self(&self) -> bool {
        true
    }
}

/// A full command: invocable and intercepting.
pub trait BotCommand: Executable + Interceptor {}

impl<C: Executable + Interceptor> BotCommand for C {}

/// Whether `candidate` names `command`, either directly or through an alias.
pub fn is_command(candidate: &str, command: &dyn Executable) -> bool {
    candidate == command.name() || command.aliases().iter().any(|alias| alias == candidate)
}

/// Whether `name` matches `^[a-z][a-z0-9]*$`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
