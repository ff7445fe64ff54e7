// Content domains and identity

pub mod auth;
pub mod authors;
pub mod books;
pub mod comments;
pub mod posts;
