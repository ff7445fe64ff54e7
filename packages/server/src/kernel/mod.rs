//! Kernel module - server infrastructure.

pub mod store;

pub use store::{Content, ContentStore};
