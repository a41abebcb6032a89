//! Portal roles.

use serde::{Deserialize, Serialize};

/// Permission tier of an identity.
///
/// Stored as lowercase text in the `users` table and carried verbatim in
/// access-token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default tier for every registered member and for guests.
    Student,
    /// Moderation tier: may manage users, bans, and others' content.
    Teacher,
    /// Site owner tier; same moderation rights as teacher.
    Creator,
}

impl Role {
    /// Whether this role carries moderation rights.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Teacher | Self::Creator)
    }

    /// Lowercase name, matching the stored and serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Creator => "creator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
