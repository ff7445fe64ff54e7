use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PolicyError;

/// Atomic capabilities granted to roles.
///
/// The string forms (`can_view`, ...) are what policy files and logs use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CanView,
    CanCreate,
    CanEdit,
    CanDelete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::CanView,
        Permission::CanCreate,
        Permission::CanEdit,
        Permission::CanDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CanView => "can_view",
            Permission::CanCreate => "can_create",
            Permission::CanEdit => "can_edit",
            Permission::CanDelete => "can_delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PolicyError::UnknownPermission(s.to_string()))
    }
}

/// What a subject is trying to do to a resource type or instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    /// Static action → permission table.
    pub fn required_permission(self) -> Permission {
        match self {
            Action::View => Permission::CanView,
            Action::Create => Permission::CanCreate,
            Action::Edit => Permission::CanEdit,
            Action::Delete => Permission::CanDelete,
        }
    }

    /// Edit and Delete are only meaningful against a specific instance.
    pub fn requires_instance(self) -> bool {
        matches!(self, Action::Edit | Action::Delete)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}
