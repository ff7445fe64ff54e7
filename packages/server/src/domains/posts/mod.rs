//! Posts domain - blog posts
//!
//! Any member may read; authors may edit and delete their own posts.

pub mod edges;
pub mod models;

pub use models::{CreatePost, Post, UpdatePost};
