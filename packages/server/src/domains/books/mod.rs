//! Books domain - the library catalogue
//!
//! Librarians add books, admins manage everything, and whoever added a
//! book may edit or remove it.

pub mod edges;
pub mod models;

pub use models::{Book, CreateBook, UpdateBook};
