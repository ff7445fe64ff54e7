#![allow(dead_code)]

use shelfgate::common::auth::{AuthenticatedUser, Role};
use shelfgate::common::UserId;
use shelfgate::domains::authors::{Author, CreateAuthor};
use shelfgate::domains::books::{Book, CreateBook};
use shelfgate::domains::comments::{Comment, CreateComment};
use shelfgate::domains::posts::{CreatePost, Post};

use super::TestHarness;

pub fn user_with_role(role: Role) -> AuthenticatedUser {
    AuthenticatedUser::builder()
        .user_id(UserId::new())
        .role(role)
        .build()
}

pub fn user_without_role() -> AuthenticatedUser {
    AuthenticatedUser::builder().user_id(UserId::new()).build()
}

pub fn staff_without_role() -> AuthenticatedUser {
    AuthenticatedUser::builder()
        .user_id(UserId::new())
        .is_staff(true)
        .build()
}

impl TestHarness {
    pub async fn seed_author(&self, owner_id: UserId) -> Author {
        let author = CreateAuthor {
            name: "Ursula K. Le Guin".to_string(),
        }
        .into_author(owner_id);
        self.state.authors.insert(author).await
    }

    /// Insert a book straight into the store, bypassing the gate. The book
    /// gets a fresh author owned by the same user.
    pub async fn seed_book(&self, owner_id: UserId) -> Book {
        let author = self.seed_author(owner_id).await;
        self.seed_book_by(&author, owner_id).await
    }

    pub async fn seed_book_by(&self, author: &Author, owner_id: UserId) -> Book {
        let book = CreateBook {
            title: "The Left Hand of Darkness".to_string(),
            author_id: author.id,
            publication_year: 1969,
        }
        .into_book(owner_id);
        self.state.books.insert(book).await
    }

    pub async fn seed_post(&self, author_id: UserId) -> Post {
        let post = CreatePost {
            title: "Opening hours".to_string(),
            content: "The reading room opens at nine.".to_string(),
        }
        .into_post(author_id);
        self.state.posts.insert(post).await
    }

    pub async fn seed_comment(&self, post: &Post, author_id: UserId) -> Comment {
        let comment = CreateComment {
            content: "See you there".to_string(),
        }
        .into_comment(post.id, author_id);
        self.state.comments.insert(comment).await
    }
}
