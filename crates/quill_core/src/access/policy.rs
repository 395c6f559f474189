//! Role-gated capability table and session facts.
//!
//! # Responsibility
//! - Name every gated action in one closed enum.
//! - Map each role (and anonymous visitors) to its allowed actions in one
//!   table, so authorization stays auditable in a single place.
//!
//! # Invariants
//! - Deny by default: an action missing from a role's row is refused.
//! - The catalog store never consults this table itself; callers do.

use crate::model::user::UserRole;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Gated catalog action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    ViewPublic,
    SubmitComment,
    AccessAdminConsole,
    ManagePosts,
    ModerateComments,
    ManageMedia,
    GenerateContent,
    ManageUsers,
    CreateUser,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Self::ViewPublic,
        Self::SubmitComment,
        Self::AccessAdminConsole,
        Self::ManagePosts,
        Self::ModerateComments,
        Self::ManageMedia,
        Self::GenerateContent,
        Self::ManageUsers,
        Self::CreateUser,
    ];

    /// Stable string id used in logs and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewPublic => "view_public",
            Self::SubmitComment => "submit_comment",
            Self::AccessAdminConsole => "access_admin_console",
            Self::ManagePosts => "manage_posts",
            Self::ModerateComments => "moderate_comments",
            Self::ManageMedia => "manage_media",
            Self::GenerateContent => "generate_content",
            Self::ManageUsers => "manage_users",
            Self::CreateUser => "create_user",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::ViewPublic => "Browse, search and read published posts.",
            Self::SubmitComment => "Submit a comment for moderation.",
            Self::AccessAdminConsole => "Open the admin console and dashboard.",
            Self::ManagePosts => "Create, edit and delete posts.",
            Self::ModerateComments => "Approve, unapprove and delete comments.",
            Self::ManageMedia => "Upload and delete media library assets.",
            Self::GenerateContent => "Request generated post text and images.",
            Self::ManageUsers => "Change user roles and delete users.",
            Self::CreateUser => "Create new user accounts.",
        }
    }
}

const PUBLIC_ACTIONS: &[Action] = &[Action::ViewPublic, Action::SubmitComment];

const EDITOR_ACTIONS: &[Action] = &[
    Action::ViewPublic,
    Action::SubmitComment,
    Action::AccessAdminConsole,
    Action::ManagePosts,
    Action::ModerateComments,
    Action::ManageMedia,
    Action::GenerateContent,
];

/// Allowed actions for a role. `None` is an anonymous visitor.
pub fn allowed_actions(role: Option<UserRole>) -> &'static [Action] {
    match role {
        Some(UserRole::Administrator) => &Action::ALL,
        Some(UserRole::Editor) => EDITOR_ACTIONS,
        Some(UserRole::Reader) | None => PUBLIC_ACTIONS,
    }
}

/// Whether `role` may perform `action`.
pub fn is_allowed(role: Option<UserRole>, action: Action) -> bool {
    allowed_actions(role).contains(&action)
}

/// Authentication facts the rest of the system may ask about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    role: Option<UserRole>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: UserRole) -> Self {
        Self { role: Some(role) }
    }

    pub fn sign_out(&mut self) {
        self.role = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    /// Checks `action` against the capability table.
    pub fn authorize(&self, action: Action) -> Result<(), AccessError> {
        if is_allowed(self.role, action) {
            Ok(())
        } else {
            Err(AccessError::Denied {
                role: self.role,
                action,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    Denied {
        role: Option<UserRole>,
        action: Action,
    },
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied {
                role: Some(role),
                action,
            } => write!(f, "role `{role}` may not {}", action.as_str()),
            Self::Denied { role: None, action } => {
                write!(f, "anonymous visitors may not {}", action.as_str())
            }
        }
    }
}

impl Error for AccessError {}

#[cfg(test)]
mod tests {
    use super::{allowed_actions, Action};
    use crate::model::user::UserRole;

    #[test]
    fn administrator_row_covers_every_action() {
        assert_eq!(
            allowed_actions(Some(UserRole::Administrator)).len(),
            Action::ALL.len()
        );
    }

    #[test]
    fn reader_and_anonymous_share_the_public_row() {
        assert_eq!(
            allowed_actions(Some(UserRole::Reader)),
            allowed_actions(None)
        );
    }

    #[test]
    fn every_action_has_a_distinct_id_and_description() {
        let mut ids = Action::ALL.map(Action::as_str).to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Action::ALL.len());
        assert!(Action::ALL
            .iter()
            .all(|action| !action.description().is_empty()));
    }
}
