//! Role→permission mapping and public-read flags.
//!
//! A `Policy` is built once, then shared read-only behind an `Arc`. Runtime
//! changes go through [`PolicyRegistry`](super::PolicyRegistry), which swaps
//! whole policies rather than editing one in place.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::{Permission, PolicyError, ResourceKind, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
    public_read: BTreeSet<ResourceKind>,
}

impl Policy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// A policy with no roles mapped. Every non-staff subject is denied
    /// with `NoRoleAssigned` under it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        !self.grants.is_empty()
    }

    /// Permissions of `role`, or `None` if the role is not mapped at all.
    pub fn permissions_of(&self, role: Role) -> Option<&BTreeSet<Permission>> {
        self.grants.get(&role)
    }

    pub fn is_public(&self, kind: ResourceKind) -> bool {
        self.public_read.contains(&kind)
    }

    pub fn roles(&self) -> impl Iterator<Item = (Role, &BTreeSet<Permission>)> {
        self.grants.iter().map(|(role, perms)| (*role, perms))
    }

    pub fn public_kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.public_read.iter().copied()
    }

    /// Permissions no role holds. The matching actions are reachable only
    /// by staff and superusers.
    pub fn unreachable_permissions(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| !self.grants.values().any(|perms| perms.contains(p)))
            .collect()
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let unreachable = self.unreachable_permissions();
        if unreachable.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::UnreachablePermissions(unreachable))
        }
    }

    /// Union of two policies. Merging a policy into itself is a no-op,
    /// which is what makes repeated seeding safe.
    pub fn merge(&self, other: &Policy) -> Policy {
        let mut merged = self.clone();
        for (role, perms) in &other.grants {
            merged
                .grants
                .entry(*role)
                .or_default()
                .extend(perms.iter().copied());
        }
        merged.public_read.extend(other.public_read.iter().copied());
        merged
    }

    pub fn to_config(&self) -> PolicyConfig {
        PolicyConfig {
            roles: self
                .grants
                .iter()
                .map(|(role, perms)| {
                    (
                        role.as_str().to_string(),
                        perms.iter().map(|p| p.as_str().to_string()).collect(),
                    )
                })
                .collect(),
            public_read: self.public_read.iter().map(|k| k.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PolicyBuilder {
    policy: Policy,
}

impl PolicyBuilder {
    /// Grant permissions to a role. Granting twice is the same as granting once.
    pub fn grant(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.policy
            .grants
            .entry(role)
            .or_default()
            .extend(permissions);
        self
    }

    pub fn public_read(mut self, kind: ResourceKind) -> Self {
        self.policy.public_read.insert(kind);
        self
    }

    pub fn build(self) -> Policy {
        self.policy
    }
}

/// On-disk policy format.
///
/// ```json
/// {
///   "roles": { "admin": ["can_view", "can_create", "can_edit", "can_delete"] },
///   "public_read": ["book", "post"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub public_read: Vec<String>,
}

impl PolicyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl TryFrom<PolicyConfig> for Policy {
    type Error = PolicyError;

    fn try_from(config: PolicyConfig) -> Result<Self, Self::Error> {
        let mut builder = Policy::builder();
        for (role, permissions) in &config.roles {
            let role: Role = role.parse()?;
            let permissions = permissions
                .iter()
                .map(|p| p.parse::<Permission>())
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.grant(role, permissions);
        }
        for kind in &config.public_read {
            builder = builder.public_read(kind.parse()?);
        }
        Ok(builder.build())
    }
}
