use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PolicyError;
use crate::common::UserId;

/// Content types the gate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Author,
    Book,
    Post,
    Comment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Author,
        ResourceKind::Book,
        ResourceKind::Post,
        ResourceKind::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Author => "author",
            ResourceKind::Book => "book",
            ResourceKind::Post => "post",
            ResourceKind::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PolicyError::UnknownResourceKind(s.to_string()))
    }
}

/// The authorization-relevant view of a stored content item.
///
/// Content fields never reach the gate; only the type and the creator do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub owner_id: UserId,
}

impl Resource {
    pub fn new(kind: ResourceKind, owner_id: UserId) -> Self {
        Self { kind, owner_id }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// What an action is aimed at: a whole collection or one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Collection(ResourceKind),
    Instance(Resource),
}

impl Target {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::Collection(kind) => *kind,
            Target::Instance(resource) => resource.kind,
        }
    }

    pub fn resource(&self) -> Option<&Resource> {
        match self {
            Target::Collection(_) => None,
            Target::Instance(resource) => Some(resource),
        }
    }
}

impl From<ResourceKind> for Target {
    fn from(kind: ResourceKind) -> Self {
        Target::Collection(kind)
    }
}

impl From<Resource> for Target {
    fn from(resource: Resource) -> Self {
        Target::Instance(resource)
    }
}

impl From<&Resource> for Target {
    fn from(resource: &Resource) -> Self {
        Target::Instance(*resource)
    }
}
