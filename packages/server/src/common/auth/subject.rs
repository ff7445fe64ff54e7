use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use typed_builder::TypedBuilder;

use super::PolicyError;
use crate::common::UserId;

/// Closed set of assignable roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Librarian,
    Member,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Librarian, Role::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Librarian => "librarian",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PolicyError::UnknownRole(s.to_string()))
    }
}

/// An authenticated identity as resolved by the identity collaborator.
///
/// `role: None` is a real state (a user without a profile), not a lookup
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    #[builder(default, setter(strip_option))]
    pub role: Option<Role>,
    #[builder(default)]
    pub is_staff: bool,
    #[builder(default)]
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    /// Staff and superusers bypass every permission and ownership check.
    pub fn has_override(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// The actor behind a request. Constructed once per request and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Subject {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl Subject {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Subject::Anonymous => None,
            Subject::Authenticated(user) => Some(user.user_id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Subject::Anonymous)
    }
}

impl From<AuthenticatedUser> for Subject {
    fn from(user: AuthenticatedUser) -> Self {
        Subject::Authenticated(user)
    }
}
