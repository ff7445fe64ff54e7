//! Comments domain - replies on blog posts

pub mod edges;
pub mod models;

pub use models::{Comment, CreateComment, UpdateComment};
