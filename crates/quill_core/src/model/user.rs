//! Account model and the closed role set.
//!
//! # Invariants
//! - `username` and `email` are unique, compared case-insensitively.
//! - `role` is one of exactly three values; storage rejects anything else.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role. Authorization is derived from this through the access table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    Editor,
    Reader,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Administrator, Self::Editor, Self::Reader];

    /// Stable storage/wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Editor => "editor",
            Self::Reader => "reader",
        }
    }

    /// Parses the storage identifier produced by [`UserRole::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "administrator" => Some(Self::Administrator),
            "editor" => Some(Self::Editor),
            "reader" => Some(Self::Reader),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// Account creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if self.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyEmail,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl Error for UserValidationError {}

#[cfg(test)]
mod tests {
    use super::{NewUser, UserRole, UserValidationError};

    #[test]
    fn role_identifiers_round_trip_for_every_role() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("ADMIN"), None);
    }

    #[test]
    fn new_user_requires_username_and_email() {
        let err = NewUser::new(" ", "a@example.com", UserRole::Reader)
            .validate()
            .expect_err("blank username must fail");
        assert_eq!(err, UserValidationError::EmptyUsername);

        let err = NewUser::new("ann", "", UserRole::Reader)
            .validate()
            .expect_err("blank email must fail");
        assert_eq!(err, UserValidationError::EmptyEmail);
    }
}
