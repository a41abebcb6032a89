//! Authorization gate.
//!
//! One pure decision point for every privileged operation. Handlers call
//! [`check`] with the acting identity's role and username; the gate never
//! touches the database.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::Role;

/// An operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Change another user's role.
    ChangeRole,
    /// Ban a user from logging in.
    BanUser {
        /// Username being banned.
        target: &'a str,
    },
    /// Lift a ban.
    UnbanUser,
    /// Retire another user's account.
    DeleteUser {
        /// Username being retired.
        target: &'a str,
    },
    /// View the member roster.
    ListUsers,
    /// Delete content regardless of ownership (admin surface).
    DeleteAnyContent,
    /// Publish an announcement.
    PostAnnouncement,
    /// Create ordinary content (chat, homework, ratings, ...).
    CreateContent,
    /// Delete a specific content item.
    DeleteContent {
        /// Username that owns the item.
        owner: &'a str,
    },
    /// Edit shared singleton content (site settings, word of the day).
    EditSharedContent,
}

impl Action<'_> {
    /// Stable name used in error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeRole => "change_role",
            Self::BanUser { .. } => "ban_user",
            Self::UnbanUser => "unban_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::ListUsers => "list_users",
            Self::DeleteAnyContent => "delete_any_content",
            Self::PostAnnouncement => "post_announcement",
            Self::CreateContent => "create_content",
            Self::DeleteContent { .. } => "delete_content",
            Self::EditSharedContent => "edit_shared_content",
        }
    }
}

/// Site-wide policy switches consulted by the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    /// When set, shared singleton content is editable by staff only.
    pub restrict_shared_edits: bool,
}

/// Authorization failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GateError {
    /// The role does not permit the action.
    #[error("Not allowed: {0}")]
    Forbidden(&'static str),

    /// The action may not target the acting identity itself.
    #[error("This action may not target your own account")]
    SelfActionDenied,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let code = match &self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::SelfActionDenied => "SELF_ACTION_DENIED",
        };
        let body = Json(serde_json::json!({
            "error": code,
            "message": self.to_string(),
        }));
        (StatusCode::FORBIDDEN, body).into_response()
    }
}

/// Decide whether `role`/`actor` may perform `action`.
///
/// `actor` is the acting identity's username, compared against action
/// targets for ownership and self-targeting rules.
pub fn check(
    role: Role,
    actor: &str,
    action: &Action<'_>,
    policy: &Policy,
) -> Result<(), GateError> {
    match action {
        Action::ChangeRole
        | Action::UnbanUser
        | Action::ListUsers
        | Action::DeleteAnyContent
        | Action::PostAnnouncement => staff_only(role, action),

        Action::BanUser { target } | Action::DeleteUser { target } => {
            staff_only(role, action)?;
            if *target == actor {
                return Err(GateError::SelfActionDenied);
            }
            Ok(())
        }

        // Any authenticated identity, guests included.
        Action::CreateContent => Ok(()),

        Action::DeleteContent { owner } => {
            if *owner == actor {
                Ok(())
            } else {
                staff_only(role, action)
            }
        }

        Action::EditSharedContent => {
            if policy.restrict_shared_edits {
                staff_only(role, action)
            } else {
                Ok(())
            }
        }
    }
}

fn staff_only(role: Role, action: &Action<'_>) -> Result<(), GateError> {
    if role.is_staff() {
        Ok(())
    } else {
        Err(GateError::Forbidden(action.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: Policy = Policy {
        restrict_shared_edits: false,
    };
    const RESTRICTED: Policy = Policy {
        restrict_shared_edits: true,
    };

    #[test]
    fn admin_actions_require_staff() {
        for action in [
            Action::ChangeRole,
            Action::UnbanUser,
            Action::ListUsers,
            Action::DeleteAnyContent,
            Action::PostAnnouncement,
        ] {
            assert_eq!(
                check(Role::Student, "amy", &action, &OPEN),
                Err(GateError::Forbidden(action.name()))
            );
            assert_eq!(check(Role::Teacher, "amy", &action, &OPEN), Ok(()));
            assert_eq!(check(Role::Creator, "amy", &action, &OPEN), Ok(()));
        }
    }

    #[test]
    fn ban_rejects_self_target() {
        let action = Action::BanUser { target: "bob" };
        assert_eq!(
            check(Role::Teacher, "bob", &action, &OPEN),
            Err(GateError::SelfActionDenied)
        );
        assert_eq!(check(Role::Teacher, "amy", &action, &OPEN), Ok(()));
    }

    #[test]
    fn ban_by_student_is_forbidden_before_self_check() {
        // A student targeting themselves still fails on the role, not on
        // the self rule.
        let action = Action::BanUser { target: "amy" };
        assert_eq!(
            check(Role::Student, "amy", &action, &OPEN),
            Err(GateError::Forbidden("ban_user"))
        );
    }

    #[test]
    fn delete_user_rejects_self_target() {
        let action = Action::DeleteUser { target: "amy" };
        assert_eq!(
            check(Role::Creator, "amy", &action, &OPEN),
            Err(GateError::SelfActionDenied)
        );
    }

    #[test]
    fn anyone_may_create_content() {
        assert_eq!(check(Role::Student, "guest", &Action::CreateContent, &OPEN), Ok(()));
    }

    #[test]
    fn owners_delete_their_own_content() {
        let action = Action::DeleteContent { owner: "amy" };
        assert_eq!(check(Role::Student, "amy", &action, &OPEN), Ok(()));
    }

    #[test]
    fn non_owner_deletion_requires_staff() {
        let action = Action::DeleteContent { owner: "amy" };
        assert_eq!(
            check(Role::Student, "bob", &action, &OPEN),
            Err(GateError::Forbidden("delete_content"))
        );
        assert_eq!(check(Role::Teacher, "bob", &action, &OPEN), Ok(()));
    }

    #[test]
    fn shared_edits_open_by_default() {
        assert_eq!(
            check(Role::Student, "amy", &Action::EditSharedContent, &OPEN),
            Ok(())
        );
    }

    #[test]
    fn shared_edits_can_be_restricted_to_staff() {
        assert_eq!(
            check(Role::Student, "amy", &Action::EditSharedContent, &RESTRICTED),
            Err(GateError::Forbidden("edit_shared_content"))
        );
        assert_eq!(
            check(Role::Teacher, "amy", &Action::EditSharedContent, &RESTRICTED),
            Ok(())
        );
    }
}
