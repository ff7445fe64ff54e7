use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::auth::{Resource, ResourceKind};
use crate::common::validation::require_text;
use crate::common::{Comment as CommentMarker, CommentId, PostId, UserId, ValidationError};
use crate::kernel::Content;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content for Comment {
    type Marker = CommentMarker;

    fn id(&self) -> CommentId {
        self.id
    }

    fn resource(&self) -> Resource {
        Resource::new(ResourceKind::Comment, self.author_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}

impl CreateComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("content", &self.content)
    }

    pub fn into_comment(self, post_id: PostId, author_id: UserId) -> Comment {
        let now = Utc::now();
        Comment {
            id: CommentId::new(),
            post_id,
            author_id,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}

impl UpdateComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("content", &self.content)
    }

    pub fn apply(self, comment: &mut Comment) {
        comment.content = self.content;
        comment.updated_at = Utc::now();
    }
}
