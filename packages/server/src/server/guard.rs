//! The one place handlers consult the authorization gate.

use tracing::warn;

use crate::common::auth::{Action, Actor, AuthError, DenyReason, HasAuthContext, Subject, Target};
use crate::common::UserId;
use crate::server::ApiError;

/// Ask the gate before acting. Handlers fetch the instance first (for
/// instance-scoped actions), call this, then touch the store.
pub fn authorize<D>(
    deps: &D,
    subject: &Subject,
    action: Action,
    target: impl Into<Target>,
) -> Result<(), ApiError>
where
    D: HasAuthContext + ?Sized,
{
    let target = target.into();
    Actor::new(subject)
        .can(action)
        .on(target)
        .check(deps)
        .map_err(|e| {
            if let AuthError::Forbidden(reason) = &e {
                warn!(
                    user_id = ?subject.user_id(),
                    action = %action,
                    kind = %target.kind(),
                    reason = ?reason,
                    "Request forbidden"
                );
            }
            ApiError::from(e)
        })
}

/// The acting user's id for records that need an owner.
///
/// Only reachable after an Allow on Create, which anonymous subjects never
/// get, but checked rather than assumed.
pub fn require_user(subject: &Subject) -> Result<UserId, ApiError> {
    subject
        .user_id()
        .ok_or(ApiError::Auth(AuthError::Forbidden(DenyReason::AnonymousForbidden)))
}
