use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::auth::{AuthError, DenyReason, Permission, Role, Subject};
use crate::common::UserId;
use crate::server::app::AppState;
use crate::server::ApiError;

#[derive(Serialize)]
pub struct ProfileResponse {
    user_id: UserId,
    role: Option<Role>,
    is_staff: bool,
    is_superuser: bool,
    /// What the current policy grants the role. Empty without a mapped role.
    permissions: Vec<Permission>,
}

/// The signed-in user's resolved identity. Anonymous callers are refused.
pub async fn me_handler(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Subject::Authenticated(user) = subject else {
        return Err(ApiError::Auth(AuthError::Forbidden(
            DenyReason::AnonymousForbidden,
        )));
    };

    let policy = state.registry.snapshot();
    let permissions = user
        .role
        .and_then(|role| policy.permissions_of(role))
        .map(|granted| granted.iter().copied().collect())
        .unwrap_or_default();

    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        role: user.role,
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
        permissions,
    }))
}
