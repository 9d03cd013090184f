use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The command name does not match `^[a-z][a-z0-9]*$`.
    #[error("invalid command name {0:?}")]
    InvalidName(String),
    /// Another command already answers to this name or alias.
    #[error("command name {0:?} is already taken")]
    NameTaken(String),
    /// The invocation's arguments were not understood.
    #[error("usage: {0}")]
    Usage(String),
    #[error("command init failed: {0}")]
    Init(String),
    #[error("command failed: {0}")]
    Failed(String),
}
