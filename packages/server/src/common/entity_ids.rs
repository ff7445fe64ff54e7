//! Typed ID definitions for the content domains.

pub use super::id::Id;

/// Marker type for users (the `owner_id` side of every resource).
pub struct User;

/// Marker type for book authors.
pub struct Author;

/// Marker type for library books.
pub struct Book;

/// Marker type for blog posts.
pub struct Post;

/// Marker type for comments on blog posts.
pub struct Comment;

pub type UserId = Id<User>;
pub type AuthorId = Id<Author>;
pub type BookId = Id<Book>;
pub type PostId = Id<Post>;
pub type CommentId = Id<Comment>;
