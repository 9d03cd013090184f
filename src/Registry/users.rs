use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Domain::User;

/// Read access to a table of users. Lookups return copies.
pub trait UserDirectory {
    fn all(&self) -> Vec<User>;
    fn get(&self, index: usize) -> Option<User>;
    fn find(&self, nick: &str) -> Option<User>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Users {
    users: Vec<User>,
    /// nick -> position in `users`
    index: HashMap<String, usize>,
}

/// Online users, in insertion order, indexed by nick.
#[derive(Debug, Default)]
pub struct UserList {
    inner: RwLock<Users>,
}

impl UserList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let list = Self::new();
        for user in users {
            list.add(user);
        }
        list
    }

    /// Adds a user, or replaces the entry with the same nick in place.
    /// Users with a blank nick are ignored and `false` is returned.
    pub fn add(&self, user: User) -> bool {
        if user.nick.trim().is_empty() {
            return false;
        }
        let mut inner = self.inner.write();
        match inner.index.get(&user.nick).copied() {
            Some(i) => inner.users[i] = user,
            None => {
                let i = inner.users.len();
                inner.index.insert(user.nick.clone(), i);
                inner.users.push(user);
            }
        }
        true
    }

    /// Removes the user with this nick, shifting later users down by one.
    pub fn remove(&self, nick: &str) -> Option<User> {
        let mut inner = self.inner.write();
        let i = inner.index.remove(nick)?;
        let removed = inner.users.remove(i);

        let Users { users, index } = &mut *inner;
        for (offset, user) in users[i..].iter().enumerate() {
            index.insert(user.nick.clone(), i + offset);
        }
        Some(removed)
    }

    /// An independent list with the same users.
    pub fn copy(&self) -> UserList {
        UserList::from_users(self.all())
    }

    pub fn into_read_only(self) -> ReadOnlyUsers {
        ReadOnlyUsers(Arc::new(self))
    }
}

impl UserDirectory for UserList {
    fn all(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    fn get(&self, index: usize) -> Option<User> {
        self.inner.read().users.get(index).cloned()
    }

    fn find(&self, nick: &str) -> Option<User> {
        let inner = self.inner.read();
        inner.index.get(nick).map(|&i| inner.users[i].clone())
    }

    fn len(&self) -> usize {
        self.inner.read().users.len()
    }
}

/// A shared, read-only view of a [`UserList`].
///
/// Built from an `Arc<UserList>`, the view follows later changes made by
/// whoever still holds the list; it cannot make any itself.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyUsers(Arc<UserList>);

impl ReadOnlyUsers {
    /// An independent, mutable snapshot of the viewed users.
    pub fn copy(&self) -> UserList {
        self.0.copy()
    }
}

impl From<Arc<UserList>> for ReadOnlyUsers {
    fn from(list: Arc<UserList>) -> Self {
        ReadOnlyUsers(list)
    }
}

impl UserDirectory for ReadOnlyUsers {
    fn all(&self) -> Vec<User> {
        self.0.all()
    }

    fn get(&self, index: usize) -> Option<User> {
        self.0.get(index)
    }

    fn find(&self, nick: &str) -> Option<User> {
        self.0.find(nick)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
