use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::{Resource, ResourceKind};
use crate::common::validation::require_text;
use crate::common::{AuthorId, Book as BookMarker, BookId, UserId, ValidationError};
use crate::kernel::Content;

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    pub publication_year: i32,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content for Book {
    type Marker = BookMarker;

    fn id(&self) -> BookId {
        self.id
    }

    fn resource(&self) -> Resource {
        Resource::new(ResourceKind::Book, self.owner_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author_id: AuthorId,
    pub publication_year: i32,
}

impl CreateBook {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        validate_publication_year(self.publication_year)
    }

    pub fn into_book(self, owner_id: UserId) -> Book {
        let now = Utc::now();
        Book {
            id: BookId::new(),
            title: self.title.trim().to_string(),
            author_id: self.author_id,
            publication_year: self.publication_year,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author_id: Option<AuthorId>,
    pub publication_year: Option<i32>,
}

impl UpdateBook {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(year) = self.publication_year {
            validate_publication_year(year)?;
        }
        Ok(())
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title.trim().to_string();
        }
        if let Some(author_id) = self.author_id {
            book.author_id = author_id;
        }
        if let Some(year) = self.publication_year {
            book.publication_year = year;
        }
        book.updated_at = Utc::now();
    }
}

/// Publication year cannot be in the future.
fn validate_publication_year(year: i32) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if year > current_year {
        return Err(ValidationError::new(
            "publication_year",
            format!("cannot be in the future (current year is {})", current_year),
        ));
    }
    Ok(())
}
