//! Auth domain - resolves request subjects from bearer tokens
//!
//! Password handling lives with the external identity provider; this side
//! only issues and verifies the JWTs that carry role and staff flags.

pub mod jwt;

pub use jwt::{Claims, JwtService};
