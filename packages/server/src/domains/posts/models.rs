use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::{Resource, ResourceKind};
use crate::common::validation::require_text;
use crate::common::{Post as PostMarker, PostId, UserId, ValidationError};
use crate::kernel::Content;

/// Maximum post title length, in characters
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content for Post {
    type Marker = PostMarker;

    fn id(&self) -> PostId {
        self.id
    }

    fn resource(&self) -> Resource {
        Resource::new(ResourceKind::Post, self.author_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

impl CreatePost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        require_text("content", &self.content)
    }

    pub fn into_post(self, author_id: UserId) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(),
            title: self.title.trim().to_string(),
            content: self.content,
            author_id,
            published_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content)?;
        }
        Ok(())
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title.trim().to_string();
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        post.updated_at = Utc::now();
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    require_text("title", title)?;
    if title.trim().chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}
