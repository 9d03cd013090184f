use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Domain::Command;

/// Read access to a table of command descriptors.
pub trait CommandDirectory {
    fn all(&self) -> Vec<Command>;
    fn get(&self, index: usize) -> Option<Command>;
    /// Look a command up by name or alias.
    fn find(&self, name: &str) -> Option<Command>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Commands {
    commands: Vec<Command>,
    /// name or alias -> position in `commands`
    index: HashMap<String, usize>,
}

/// Announced commands, in insertion order, indexed by name and alias.
#[derive(Debug, Default)]
pub struct CommandList {
    inner: RwLock<Commands>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        let list = Self::new();
        for command in commands {
            list.add(command);
        }
        list
    }

    /// Adds a command and indexes its name and non-blank aliases. A later
    /// command claiming an existing name or alias takes it over.
    /// Commands with a blank name are ignored and `false` is returned.
    pub fn add(&self, command: Command) -> bool {
        if command.name.trim().is_empty() {
            return false;
        }
        let mut inner = self.inner.write();
        let i = inner.commands.len();
        for name in command.names().filter(|n| !n.trim().is_empty()) {
            inner.index.insert(name.to_string(), i);
        }
        inner.commands.push(command);
        true
    }

    /// Adds every command of `other`.
    pub fn append(&self, other: &dyn CommandDirectory) {
        // Snapshot first: `other` may be a view of this very list.
        for command in other.all() {
            self.add(command);
        }
    }

    pub fn copy(&self) -> CommandList {
        CommandList::from_commands(self.all())
    }

    pub fn into_read_only(self) -> ReadOnlyCommands {
        ReadOnlyCommands(Arc::new(self))
    }
}

impl CommandDirectory for CommandList {
    fn all(&self) -> Vec<Command> {
        self.inner.read().commands.clone()
    }

    fn get(&self, index: usize) -> Option<Command> {
        self.inner.read().commands.get(index).cloned()
    }

    fn find(&self, name: &str) -> Option<Command> {
        let inner = self.inner.read();
        inner.index.get(name).map(|&i| inner.commands[i].clone())
    }

    fn len(&self) -> usize {
        self.inner.read().commands.len()
    }
}

/// A shared, read-only view of a [`CommandList`].
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyCommands(Arc<CommandList>);

impl ReadOnlyCommands {
    pub fn copy(&self) -> CommandList {
        self.0.copy()
    }
}

impl From<Arc<CommandList>> for ReadOnlyCommands {
    fn from(list: Arc<CommandList>) -> Self {
        ReadOnlyCommands(list)
    }
}

impl CommandDirectory for ReadOnlyCommands {
    fn all(&self) -> Vec<Command> {
        self.0.all()
    }

    fn get(&self, index: usize) -> Option<Command> {
        self.0.get(index)
    }

    fn find(&self, name: &str) -> Option<Command> {
        self.0.find(name)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
