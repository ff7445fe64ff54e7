// Common types shared across the application

pub mod auth;
pub mod entity_ids;
pub mod id;
pub mod validation;

pub use auth::{Action, Actor, AuthError, HasAuthContext, Subject};
pub use entity_ids::*;
pub use id::Id;
pub use validation::ValidationError;
