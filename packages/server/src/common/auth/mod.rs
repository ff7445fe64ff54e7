/// Authorization for shelfgate content
///
/// A single pure gate decides every request. Call sites go through the
/// fluent builder:
///
/// ```rust,ignore
/// use crate::common::auth::{Action, Actor};
///
/// Actor::new(&subject)
///     .can(Action::Edit)
///     .on(book.resource())
///     .check(&state)?;
/// ```
///
/// The role→permission mapping lives in a `PolicyRegistry` seeded once at
/// startup by `bootstrap::provision`.

mod builder;
mod capability;
mod errors;
mod gate;
mod policy;
mod registry;
mod resource;
mod subject;

pub mod bootstrap;

pub use builder::{ActionBuilder, Actor, CapabilityBuilder, HasAuthContext};
pub use capability::{Action, Permission};
pub use errors::{AuthError, PolicyError};
pub use gate::{AuthorizationGate, Decision, DenyReason};
pub use policy::{Policy, PolicyBuilder, PolicyConfig};
pub use registry::PolicyRegistry;
pub use resource::{Resource, ResourceKind, Target};
pub use subject::{AuthenticatedUser, Role, Subject};
