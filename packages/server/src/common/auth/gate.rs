//! The authorization decision function.
//!
//! Precedence, highest first:
//! staff override > role permission > ownership override > deny.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use super::{Action, AuthError, Policy, Subject, Target};

/// Why a request was denied. Diagnostic only; never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoRoleAssigned,
    RoleLacksPermission,
    NotOwnerAndNoOverride,
    AnonymousForbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AuthError::Forbidden(reason)),
        }
    }
}

/// Pure gate over an immutable policy snapshot. Cheap to clone and share
/// across request handlers.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    policy: Arc<Policy>,
}

impl AuthorizationGate {
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decide whether `subject` may perform `action` on `target`.
    ///
    /// Returns `Err(AuthError::InvalidRequest)` only when the caller asks
    /// about Edit or Delete without naming an instance. Every well-formed
    /// request yields a `Decision`.
    pub fn decide(
        &self,
        subject: &Subject,
        action: Action,
        target: impl Into<Target>,
    ) -> Result<Decision, AuthError> {
        let target = target.into();
        let kind = target.kind();

        if action.requires_instance() && target.resource().is_none() {
            error!(
                action = %action,
                kind = %kind,
                "Authorization gate called without a resource instance"
            );
            return Err(AuthError::InvalidRequest { action, kind });
        }

        let decision = self.evaluate(subject, action, &target);
        debug!(
            user_id = ?subject.user_id(),
            action = %action,
            kind = %kind,
            decision = ?decision,
            "Authorization decided"
        );
        Ok(decision)
    }

    fn evaluate(&self, subject: &Subject, action: Action, target: &Target) -> Decision {
        let public_view = action == Action::View && self.policy.is_public(target.kind());

        let user = match subject {
            Subject::Anonymous if public_view => return Decision::Allow,
            Subject::Anonymous => return Decision::Deny(DenyReason::AnonymousForbidden),
            Subject::Authenticated(user) => user,
        };

        if user.has_override() {
            return Decision::Allow;
        }

        // A role missing from the mapping is treated like no role at all, so
        // a gate consulted before seeding can only deny.
        let Some(granted) = user.role.and_then(|role| self.policy.permissions_of(role)) else {
            return if public_view {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NoRoleAssigned)
            };
        };

        if granted.contains(&action.required_permission()) {
            return Decision::Allow;
        }

        match target {
            Target::Instance(resource) if action.requires_instance() => {
                if resource.is_owned_by(user.user_id) {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::NotOwnerAndNoOverride)
                }
            }
            _ if public_view => Decision::Allow,
            _ => Decision::Deny(DenyReason::RoleLacksPermission),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::auth::bootstrap::default_groups;
    use crate::common::auth::{AuthenticatedUser, Permission, Resource, ResourceKind, Role};
    use crate::common::UserId;

    fn gate() -> AuthorizationGate {
        AuthorizationGate::new(Arc::new(default_groups()))
    }

    fn private_gate() -> AuthorizationGate {
        AuthorizationGate::new(Arc::new(
            Policy::builder()
                .grant(Role::Admin, Permission::ALL)
                .grant(Role::Member, [Permission::CanView])
                .public_read(ResourceKind::Book)
                .build(),
        ))
    }

    fn user(role: Option<Role>) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            role,
            is_staff: false,
            is_superuser: false,
        }
    }

    fn subjects() -> Vec<Subject> {
        let mut all = vec![Subject::Anonymous];
        for role in [None, Some(Role::Admin), Some(Role::Librarian), Some(Role::Member)] {
            for (is_staff, is_superuser) in [(false, false), (true, false), (false, true)] {
                all.push(Subject::Authenticated(AuthenticatedUser {
                    is_staff,
                    is_superuser,
                    ..user(role)
                }));
            }
        }
        all
    }

    fn targets(owner: UserId) -> Vec<Target> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(|kind| {
                [
                    Target::Collection(kind),
                    Target::Instance(Resource::new(kind, owner)),
                ]
            })
            .collect()
    }

    #[test]
    fn test_decisions_are_deterministic() {
        let gate = gate();
        let owner = UserId::new();
        for subject in subjects() {
            for action in Action::ALL {
                for target in targets(owner) {
                    let first = gate.decide(&subject, action, target);
                    let second = gate.decide(&subject, action, target);
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn test_staff_override_dominates_every_role_and_action() {
        let gate = private_gate();
        let stranger = UserId::new();
        for role in [None, Some(Role::Admin), Some(Role::Librarian), Some(Role::Member)] {
            for (is_staff, is_superuser) in [(true, false), (false, true), (true, true)] {
                let subject = Subject::Authenticated(AuthenticatedUser {
                    is_staff,
                    is_superuser,
                    ..user(role)
                });
                for action in Action::ALL {
                    for kind in ResourceKind::ALL {
                        let resource = Resource::new(kind, stranger);
                        assert_eq!(
                            gate.decide(&subject, action, resource),
                            Ok(Decision::Allow),
                            "{:?} {:?} {:?}",
                            subject,
                            action,
                            kind
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_anonymous_never_mutates() {
        let gate = gate();
        for kind in ResourceKind::ALL {
            let resource = Resource::new(kind, UserId::new());
            assert_eq!(
                gate.decide(&Subject::Anonymous, Action::Create, kind),
                Ok(Decision::Deny(DenyReason::AnonymousForbidden))
            );
            for action in [Action::Create, Action::Edit, Action::Delete] {
                assert_eq!(
                    gate.decide(&Subject::Anonymous, action, resource),
                    Ok(Decision::Deny(DenyReason::AnonymousForbidden))
                );
            }
        }
    }

    #[test]
    fn test_ownership_overrides_missing_edit_permission() {
        let gate = gate();
        let member = user(Some(Role::Member));
        let subject = Subject::Authenticated(member.clone());

        let own = Resource::new(ResourceKind::Post, member.user_id);
        assert_eq!(gate.decide(&subject, Action::Edit, own), Ok(Decision::Allow));
        assert_eq!(gate.decide(&subject, Action::Delete, own), Ok(Decision::Allow));

        let theirs = Resource::new(ResourceKind::Post, UserId::new());
        assert_eq!(
            gate.decide(&subject, Action::Edit, theirs),
            Ok(Decision::Deny(DenyReason::NotOwnerAndNoOverride))
        );
    }

    #[test]
    fn test_role_grant_is_enough_without_ownership() {
        let gate = AuthorizationGate::new(Arc::new(
            Policy::builder()
                .grant(Role::Librarian, [Permission::CanView, Permission::CanEdit])
                .build(),
        ));
        let subject = Subject::Authenticated(user(Some(Role::Librarian)));
        let not_theirs = Resource::new(ResourceKind::Book, UserId::new());

        assert_eq!(gate.decide(&subject, Action::Edit, not_theirs), Ok(Decision::Allow));
        assert_eq!(
            gate.decide(&subject, Action::Delete, not_theirs),
            Ok(Decision::Deny(DenyReason::NotOwnerAndNoOverride))
        );
    }

    #[test]
    fn test_unassigned_role_fails_safe() {
        let gate = private_gate();
        let subject = Subject::Authenticated(user(None));
        let own = Resource::new(ResourceKind::Post, subject.user_id().unwrap());

        assert_eq!(
            gate.decide(&subject, Action::Create, ResourceKind::Post),
            Ok(Decision::Deny(DenyReason::NoRoleAssigned))
        );
        // Ownership is not consulted without a role.
        assert_eq!(
            gate.decide(&subject, Action::Edit, own),
            Ok(Decision::Deny(DenyReason::NoRoleAssigned))
        );
        assert_eq!(
            gate.decide(&subject, Action::Delete, own),
            Ok(Decision::Deny(DenyReason::NoRoleAssigned))
        );

        // View still follows the public-read flag.
        assert_eq!(
            gate.decide(&subject, Action::View, ResourceKind::Book),
            Ok(Decision::Allow)
        );
        assert_eq!(
            gate.decide(&subject, Action::View, ResourceKind::Post),
            Ok(Decision::Deny(DenyReason::NoRoleAssigned))
        );
    }

    #[test]
    fn test_unpopulated_policy_never_allows_mutation() {
        let gate = AuthorizationGate::new(Arc::new(Policy::empty()));
        for role in Role::ALL {
            let subject = Subject::Authenticated(user(Some(role)));
            let own = Resource::new(ResourceKind::Book, subject.user_id().unwrap());
            assert_eq!(
                gate.decide(&subject, Action::Create, ResourceKind::Book),
                Ok(Decision::Deny(DenyReason::NoRoleAssigned))
            );
            assert_eq!(
                gate.decide(&subject, Action::Edit, own),
                Ok(Decision::Deny(DenyReason::NoRoleAssigned))
            );
            assert_eq!(
                gate.decide(&subject, Action::View, ResourceKind::Book),
                Ok(Decision::Deny(DenyReason::NoRoleAssigned))
            );
        }
    }

    #[test]
    fn test_edit_without_instance_is_invalid_request() {
        let gate = gate();
        let subject = Subject::Authenticated(user(Some(Role::Admin)));
        for action in [Action::Edit, Action::Delete] {
            assert_eq!(
                gate.decide(&subject, action, ResourceKind::Book),
                Err(AuthError::InvalidRequest {
                    action,
                    kind: ResourceKind::Book
                })
            );
        }
        // The contract check runs before the staff override.
        let staff = Subject::Authenticated(AuthenticatedUser {
            is_staff: true,
            ..user(None)
        });
        assert!(gate.decide(&staff, Action::Delete, ResourceKind::Post).is_err());
    }

    #[test]
    fn test_member_cannot_create() {
        let subject = Subject::Authenticated(user(Some(Role::Member)));
        assert_eq!(
            gate().decide(&subject, Action::Create, ResourceKind::Book),
            Ok(Decision::Deny(DenyReason::RoleLacksPermission))
        );
    }

    #[test]
    fn test_admin_deletes_anyone_resource() {
        let subject = Subject::Authenticated(user(Some(Role::Admin)));
        let resource = Resource::new(ResourceKind::Book, UserId::new());
        assert_eq!(
            gate().decide(&subject, Action::Delete, resource),
            Ok(Decision::Allow)
        );
    }

    #[test]
    fn test_librarian_edits_own_book_via_ownership() {
        let gate = gate();
        let librarian = user(Some(Role::Librarian));
        assert!(!gate
            .policy()
            .permissions_of(Role::Librarian)
            .unwrap()
            .contains(&Permission::CanEdit));

        let subject = Subject::Authenticated(librarian.clone());
        let own = Resource::new(ResourceKind::Book, librarian.user_id);
        assert_eq!(gate.decide(&subject, Action::Edit, own), Ok(Decision::Allow));
    }

    #[test]
    fn test_anonymous_view_follows_public_flag() {
        let gate = private_gate();
        let owner = UserId::new();
        assert_eq!(
            gate.decide(
                &Subject::Anonymous,
                Action::View,
                Resource::new(ResourceKind::Book, owner)
            ),
            Ok(Decision::Allow)
        );
        assert_eq!(
            gate.decide(
                &Subject::Anonymous,
                Action::View,
                Resource::new(ResourceKind::Post, owner)
            ),
            Ok(Decision::Deny(DenyReason::AnonymousForbidden))
        );
    }

    #[test]
    fn test_no_role_cannot_edit_others() {
        let subject = Subject::Authenticated(user(None));
        let other = Resource::new(ResourceKind::Post, UserId::new());
        assert_eq!(
            gate().decide(&subject, Action::Edit, other),
            Ok(Decision::Deny(DenyReason::NoRoleAssigned))
        );
    }

    #[test]
    fn test_precedence_staff_then_role_then_owner() {
        let gate = gate();
        let owner = UserId::new();
        let resource = Resource::new(ResourceKind::Post, owner);

        // Staff: allowed regardless of role or ownership.
        let staff = Subject::Authenticated(AuthenticatedUser {
            is_staff: true,
            ..user(Some(Role::Member))
        });
        assert_eq!(gate.decide(&staff, Action::Delete, resource), Ok(Decision::Allow));

        // Role grant: allowed without ownership.
        let admin = Subject::Authenticated(user(Some(Role::Admin)));
        assert_eq!(gate.decide(&admin, Action::Delete, resource), Ok(Decision::Allow));

        // Ownership: only when the role lacks the permission.
        let owner_member = Subject::Authenticated(AuthenticatedUser {
            user_id: owner,
            ..user(Some(Role::Member))
        });
        assert_eq!(
            gate.decide(&owner_member, Action::Delete, resource),
            Ok(Decision::Allow)
        );

        // Otherwise deny.
        let other_member = Subject::Authenticated(user(Some(Role::Member)));
        assert_eq!(
            gate.decide(&other_member, Action::Delete, resource),
            Ok(Decision::Deny(DenyReason::NotOwnerAndNoOverride))
        );
    }

    #[test]
    fn test_public_kind_is_viewable_by_role_without_view_grant() {
        let gate = AuthorizationGate::new(Arc::new(
            Policy::builder()
                .grant(Role::Member, [Permission::CanCreate])
                .public_read(ResourceKind::Book)
                .build(),
        ));
        let subject = Subject::Authenticated(user(Some(Role::Member)));
        let book = Resource::new(ResourceKind::Book, UserId::new());

        assert_eq!(
            gate.decide(&subject, Action::View, ResourceKind::Book),
            Ok(Decision::Allow)
        );
        assert_eq!(gate.decide(&subject, Action::View, book), Ok(Decision::Allow));
        assert_eq!(
            gate.decide(&subject, Action::View, ResourceKind::Post),
            Ok(Decision::Deny(DenyReason::RoleLacksPermission))
        );
    }

    #[test]
    fn test_role_lacking_view_on_private_kind_is_denied() {
        let gate = AuthorizationGate::new(Arc::new(
            Policy::builder()
                .grant(Role::Member, [Permission::CanCreate])
                .build(),
        ));
        let subject = Subject::Authenticated(user(Some(Role::Member)));
        assert_eq!(
            gate.decide(&subject, Action::View, ResourceKind::Comment),
            Ok(Decision::Deny(DenyReason::RoleLacksPermission))
        );
    }
}
