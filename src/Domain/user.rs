use std::cmp::Ordering;
use std::fmt;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserRole {
    #[default]
    Regular,
    Moderator,
    Admin,
}

impl UserRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Regular => "RegularUser",
            UserRole::Moderator => "Mod",
            UserRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat participant. `joined_at` is only known for online users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub nick: String,
    pub id: String,
    pub role: UserRole,
    pub joined_at: Option<SystemTime>,
}

impl User {
    pub fn new(nick: impl Into<String>, id: impl Into<String>, role: UserRole) -> Self {
        Self {
            nick: nick.into(),
            id: id.into(),
            role,
            joined_at: None,
        }
    }

    pub fn online(nick: impl Into<String>, id: impl Into<String>, role: UserRole, joined_at: SystemTime) -> Self {
        Self {
            joined_at: Some(joined_at),
            ..Self::new(nick, id, role)
        }
    }

    /// Same person: nick and id both match. Role and join time are ignored.
    pub fn is(&self, other: &User) -> bool {
        self.nick == other.nick && self.id == other.id
    }

    /// Ordering by join time; users without one sort after those with one.
    pub fn cmp_join_time(&self, other: &User) -> Ordering {
        match (self.joined_at, other.joined_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Stable sort, earliest joiner first.
pub fn sort_by_join_time(users: &mut [User]) {
    users.sort_by(User::cmp_join_time);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn is_compares_nick_and_id_only() {
        let a = User::new("alice", "1", UserRole::Regular);
        let b = User::new("alice", "1", UserRole::Admin);
        let c = User::new("alice", "2", UserRole::Regular);
        assert!(a.is(&b));
        assert!(!a.is(&c));
    }

    #[test]
    fn sorts_online_users_by_join_time() {
        let t0 = SystemTime::UNIX_EPOCH;
        let mut users = vec![
            User::online("late", "2", UserRole::Regular, t0 + Duration::from_secs(20)),
            User::online("early", "1", UserRole::Regular, t0 + Duration::from_secs(10)),
        ];
        sort_by_join_time(&mut users);
        assert_eq!(users[0].nick, "early");
        assert_eq!(users[1].nick, "late");
    }

    #[test]
    fn users_without_join_time_sort_last() {
        let t0 = SystemTime::UNIX_EPOCH;
        let mut users = vec![
            User::new("offline", "3", UserRole::Regular),
            User::online("late", "2", UserRole::Regular, t0 + Duration::from_secs(20)),
            User::online("early", "1", UserRole::Regular, t0 + Duration::from_secs(10)),
        ];
        sort_by_join_time(&mut users);
        let nicks: Vec<&str> = users.iter().map(|u| u.nick.as_str()).collect();
        assert_eq!(nicks, ["early", "late", "offline"]);
    }
}
