//! Authors domain - the people books are written by
//!
//! An author's detail view nests every catalogued book that credits them.

pub mod edges;
pub mod models;

pub use models::{Author, AuthorDetail, CreateAuthor, UpdateAuthor};
