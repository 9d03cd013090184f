//! Indexed, lock-guarded lookup tables for online users and announced
//! commands.
//!
//! Each table comes in two flavours: the mutable list, and a read-only view
//! (`ReadOnlyUsers`, `ReadOnlyCommands`) that shares the list but has no
//! mutators at all. Code that must not modify a table receives the view.

mod commands;
mod users;

pub use commands::{CommandDirectory, CommandList, ReadOnlyCommands};
pub use users::{ReadOnlyUsers, UserDirectory, UserList};
