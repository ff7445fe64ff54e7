// shelfgate - role-gated content API
//
// Books, blog posts and comments behind a single authorization gate.
// Identity comes from bearer JWTs; content lives in in-memory stores.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
