use std::ops::BitOr;

/// Permission bits. A user's level is a superset of the levels below it:
/// moderators are verified, admins are moderators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permission(u8);

impl Permission {
    pub const UNKNOWN: Permission = Permission(0);

    pub const IS_VERIFIED: Permission = Permission(0b001);
    pub const IS_MODERATOR: Permission = Permission(0b011);
    pub const IS_ADMIN: Permission = Permission(0b111);

    pub const NEED_VERIFIED: Permission = Permission(0b001);
    pub const NEED_MODERATOR: Permission = Permission(0b010);
    pub const NEED_ADMIN: Permission = Permission(0b100);

    pub const fn from_bits(bits: u8) -> Self {
        Permission(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `self` satisfies `required`. An empty requirement is always met.
    pub const fn has(self, required: Permission) -> bool {
        required.0 == 0 || self.0 & required.0 != 0
    }
}

impl BitOr for Permission {
    type Output = Permission;

    fn bitor(self, rhs: Self) -> Self::Output {
        Permission(self.0 | rhs.0)
    }
}
