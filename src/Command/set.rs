use std::collections::HashMap;

use super::{is_valid_name, BotCommand, CommandError, Executor};
use crate::Domain::{ChatMessage, ClientMessage, Command, CommandMessage, RegistrationMessage, UserEvent};

/// The commands a bot runs, indexed by name and alias.
#[derive(Default)]
pub struct CommandSet {
    commands: Vec<Box<dyn BotCommand>>,
    index: HashMap<String, usize>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command. Rejects invalid names and names or aliases already
    /// claimed by an earlier command; blank aliases are skipped.
    pub fn add(&mut self, command: Box<dyn BotCommand>) -> Result<(), CommandError> {
        let name = command.name().to_string();
        if !is_valid_name(&name) {
            return Err(CommandError::InvalidName(name));
        }
        let aliases: Vec<String> = command
            .aliases()
            .into_iter()
            .filter(|alias| !alias.trim().is_empty())
            .collect();
        if let Some(taken) = std::iter::once(&name)
            .chain(aliases.iter())
            .find(|n| self.index.contains_key(n.as_str()))
        {
            return Err(CommandError::NameTaken(taken.clone()));
        }

        let i = self.commands.len();
        self.index.insert(name, i);
        for alias in aliases {
            self.index.insert(alias, i);
        }
        self.commands.push(command);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Finds a command by name or alias.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut (dyn BotCommand + 'static)> {
        let i = *self.index.get(name)?;
        Some(self.commands[i].as_mut())
    }

    /// Runs `init` on every command, stopping at the first failure.
    pub fn init_all(&mut self, bot: &dyn Executor) -> Result<(), CommandError> {
        for command in &mut self.commands {
            command.init(bot)?;
        }
        Ok(())
    }

    /// Routes an invocation to the matching command.
    /// Returns `Ok(None)` when no command answers to the name.
    pub fn execute(&mut self, message: &CommandMessage) -> Result<Option<Vec<ClientMessage>>, CommandError> {
        match self.find_mut(&message.command) {
            Some(command) => command.execute(message).map(Some),
            None => Ok(None),
        }
    }

    /// Offers a chat line to every interceptor. `from_self` marks lines sent
    /// by the connector's own user, which most commands skip.
    pub fn on_chat(&mut self, message: &ChatMessage, from_self: bool) -> Result<Vec<ClientMessage>, CommandError> {
        let mut replies = Vec::new();
        for command in self.commands.iter_mut().filter(|c| !(from_self && c.ignore_self())) {
            replies.extend(command.on_chat(message)?);
        }
        Ok(replies)
    }

    pub fn on_user_event(&mut self, event: &UserEvent) -> Result<Vec<ClientMessage>, CommandError> {
        let mut replies = Vec::new();
        for command in &mut self.commands {
            replies.extend(command.on_user_event(event)?);
        }
        Ok(replies)
    }

    /// Public descriptors of every command, in insertion order.
    pub fn descriptors(&self) -> Vec<Command> {
        self.commands
            .iter()
            .map(|c| Command::new(c.name(), c.aliases(), c.usage()))
            .collect()
    }

    /// The registration a dispatcher sends when connecting.
    pub fn registration(&self) -> RegistrationMessage {
        RegistrationMessage::new(self.descriptors())
    }
}
