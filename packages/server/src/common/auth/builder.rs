use super::{Action, AuthError, AuthorizationGate, PolicyRegistry, Subject, Target};

/// Entry point for authorization checks at call sites.
///
/// Usage:
/// ```
/// # use shelfgate::common::auth::{Actor, Action, PolicyRegistry, ResourceKind, Subject};
/// # let registry = PolicyRegistry::new();
/// # let subject = Subject::Anonymous;
/// let result = Actor::new(&subject)
///     .can(Action::Create)
///     .on(ResourceKind::Book)
///     .check(&registry);
/// assert!(result.is_err());
/// ```
pub struct Actor<'a> {
    subject: &'a Subject,
}

impl<'a> Actor<'a> {
    pub fn new(subject: &'a Subject) -> Self {
        Self { subject }
    }

    /// Specify what the actor wants to do
    pub fn can(self, action: Action) -> ActionBuilder<'a> {
        ActionBuilder {
            subject: self.subject,
            action,
        }
    }
}

/// Builder after specifying the action
pub struct ActionBuilder<'a> {
    subject: &'a Subject,
    action: Action,
}

impl<'a> ActionBuilder<'a> {
    /// Specify the collection or instance the action targets
    pub fn on(self, target: impl Into<Target>) -> CapabilityBuilder<'a> {
        CapabilityBuilder {
            subject: self.subject,
            action: self.action,
            target: target.into(),
        }
    }
}

/// Builder after specifying the target
pub struct CapabilityBuilder<'a> {
    subject: &'a Subject,
    action: Action,
    target: Target,
}

impl CapabilityBuilder<'_> {
    /// Perform the authorization check. A deny becomes `AuthError::Forbidden`.
    pub fn check<D>(self, deps: &D) -> Result<(), AuthError>
    where
        D: HasAuthContext + ?Sized,
    {
        deps.gate()
            .decide(self.subject, self.action, self.target)?
            .into_result()
    }
}

/// Anything that can hand out a gate over the current policy.
pub trait HasAuthContext: Send + Sync {
    fn gate(&self) -> AuthorizationGate;
}

impl HasAuthContext for AuthorizationGate {
    fn gate(&self) -> AuthorizationGate {
        self.clone()
    }
}

impl HasAuthContext for PolicyRegistry {
    fn gate(&self) -> AuthorizationGate {
        PolicyRegistry::gate(self)
    }
}
