use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::{Resource, ResourceKind};
use crate::common::validation::require_text;
use crate::common::{Author as AuthorMarker, AuthorId, UserId, ValidationError};
use crate::domains::books::Book;
use crate::kernel::Content;

/// Maximum author name length, in characters
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    /// The user who added this author to the catalogue.
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content for Author {
    type Marker = AuthorMarker;

    fn id(&self) -> AuthorId {
        self.id
    }

    fn resource(&self) -> Resource {
        Resource::new(ResourceKind::Author, self.owner_id)
    }
}

/// An author together with the books that credit them.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
}

impl CreateAuthor {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    pub fn into_author(self, owner_id: UserId) -> Author {
        let now = Utc::now();
        Author {
            id: AuthorId::new(),
            name: self.name.trim().to_string(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAuthor {
    pub name: Option<String>,
}

impl UpdateAuthor {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    pub fn apply(self, author: &mut Author) {
        if let Some(name) = self.name {
            author.name = name.trim().to_string();
        }
        author.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    require_text("name", name)?;
    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}
