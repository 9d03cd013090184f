/// Public description of a bot command, as announced at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub usage: String,
}

impl Command {
    pub fn new(name: impl Into<String>, aliases: Vec<String>, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases,
            usage: usage.into(),
        }
    }

    /// The name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
