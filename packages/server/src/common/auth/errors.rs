use thiserror::Error;

use super::{Action, DenyReason, Permission, ResourceKind};

/// Authorization errors surfaced to callers of the gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A legitimate deny. The reason is for logs only; callers must not
    /// echo it to the client.
    #[error("Permission denied")]
    Forbidden(DenyReason),

    /// The caller broke the gate's input contract. This is a bug in the
    /// calling layer, not an authorization outcome.
    #[error("Invalid authorization request: {action} requires a {kind} instance")]
    InvalidRequest { action: Action, kind: ResourceKind },

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Errors building or validating a role→permission policy.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),

    #[error("Permissions granted to no role: {}", join_permissions(.0))]
    UnreachablePermissions(Vec<Permission>),

    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse policy file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn join_permissions(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
