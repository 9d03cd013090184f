use std::time::SystemTime;

use super::{Command, User};
use crate::Registry::{ReadOnlyUsers, UserList};

/// A chat line seen by the connector.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub message: String,
    pub sender: User,
    pub recipients: Vec<User>,
    /// The line mentions the connector's own user.
    pub mentions_connector_user: bool,
    pub private: bool,
    /// Received from the chat, as opposed to sent by the connector.
    pub incoming: bool,
    pub timestamp: SystemTime,
}

impl ChatMessage {
    /// A public, incoming message with no explicit recipients.
    pub fn new(message: impl Into<String>, sender: User, timestamp: SystemTime) -> Self {
        Self {
            message: message.into(),
            sender,
            recipients: Vec::new(),
            mentions_connector_user: false,
            private: false,
            incoming: true,
            timestamp,
        }
    }

    pub fn with_recipients(mut self, recipients: Vec<User>) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn with_incoming(mut self, incoming: bool) -> Self {
        self.incoming = incoming;
        self
    }

    pub fn with_mention(mut self, mentions_connector_user: bool) -> Self {
        self.mentions_connector_user = mentions_connector_user;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserEventKind {
    Joined,
    Left,
}

impl UserEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserEventKind::Joined => "JOINED",
            UserEventKind::Left => "LEFT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserEvent {
    pub user: User,
    pub kind: UserEventKind,
    pub timestamp: SystemTime,
}

impl UserEvent {
    pub fn new(user: User, kind: UserEventKind, timestamp: SystemTime) -> Self {
        Self { user, kind, timestamp }
    }
}

/// A chat line recognised as a command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMessage {
    pub command: String,
    pub args: Vec<String>,
    /// Everything after the command word, verbatim.
    pub arg_string: String,
    pub sender: User,
    pub private: bool,
    pub timestamp: SystemTime,
}

impl CommandMessage {
    /// Splits `text` (already stripped of the trigger) into the command word
    /// and its arguments. Returns `None` for blank input.
    pub fn parse(text: &str, sender: User, private: bool, timestamp: SystemTime) -> Option<Self> {
        let text = text.trim_start();
        let (command, rest) = match text.find(char::is_whitespace) {
            Some(i) => (&text[..i], text[i..].trim_start()),
            None => (text, ""),
        };
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_string(),
            args: rest.split_whitespace().map(str::to_string).collect(),
            arg_string: rest.to_string(),
            sender,
            private,
            timestamp,
        })
    }

    /// The invocation as a plain chat line: `"<command> <arg string>"`.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(
            format!("{} {}", self.command, self.arg_string),
            self.sender.clone(),
            self.timestamp,
        )
        .with_private(self.private)
        .with_incoming(false)
    }
}

/// A line the bot wants the connector to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMessage {
    pub message: String,
    /// Addressee for private messages or highlights; `None` for the channel.
    pub recipient: Option<User>,
    pub private: bool,
}

impl ClientMessage {
    pub fn new(message: impl Into<String>, recipient: Option<User>, private: bool) -> Self {
        Self {
            message: message.into(),
            recipient,
            private,
        }
    }
}

/// First message of a dispatcher: the commands it can handle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationMessage {
    pub commands: Vec<Command>,
}

impl RegistrationMessage {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

/// The connector's answer to a registration.
#[derive(Debug, Clone)]
pub struct ConfirmationMessage {
    current_user: User,
    trigger: String,
    users: ReadOnlyUsers,
}

impl ConfirmationMessage {
    pub fn new(current_user: User, trigger: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            current_user,
            trigger: trigger.into(),
            users: UserList::from_users(users).into_read_only(),
        }
    }

    /// The connector's own user.
    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    /// Prefix that marks a chat line as a command.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Online users at confirmation time, read-only.
    pub fn users(&self) -> ReadOnlyUsers {
        self.users.clone()
    }
}

/// Everything a connector forwards to dispatchers.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Chat(ChatMessage),
    UserEvent(UserEvent),
    Command(CommandMessage),
}

impl ServerMessage {
    pub fn timestamp(&self) -> SystemTime {
        match self {
            ServerMessage::Chat(m) => m.timestamp,
            ServerMessage::UserEvent(e) => e.timestamp,
            ServerMessage::Command(c) => c.timestamp,
        }
    }
}

impl From<ChatMessage> for ServerMessage {
    fn from(m: ChatMessage) -> Self {
        ServerMessage::Chat(m)
    }
}

impl From<UserEvent> for ServerMessage {
    fn from(e: UserEvent) -> Self {
        ServerMessage::UserEvent(e)
    }
}

impl From<CommandMessage> for ServerMessage {
    fn from(c: CommandMessage) -> Self {
        ServerMessage::Command(c)
    }
}
