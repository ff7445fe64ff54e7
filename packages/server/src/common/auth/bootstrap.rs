//! One-time provisioning of the role→permission mapping.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::{Permission, Policy, PolicyConfig, PolicyRegistry, ResourceKind, Role};

/// The stock groups: admins do everything, librarians add to the catalogue,
/// members read. Every kind is publicly readable.
pub fn default_groups() -> Policy {
    Policy::builder()
        .grant(Role::Admin, Permission::ALL)
        .grant(Role::Librarian, [Permission::CanView, Permission::CanCreate])
        .grant(Role::Member, [Permission::CanView])
        .public_read(ResourceKind::Author)
        .public_read(ResourceKind::Book)
        .public_read(ResourceKind::Post)
        .public_read(ResourceKind::Comment)
        .build()
}

/// Merge the stock groups into the registry. Safe to call any number of
/// times; the second and later calls leave the policy unchanged.
pub fn seed_default_groups(registry: &PolicyRegistry) -> Arc<Policy> {
    let defaults = default_groups();
    registry.update(|current| current.merge(&defaults));
    registry.snapshot()
}

pub fn load_policy_file(path: &Path) -> Result<Policy> {
    let config = PolicyConfig::load(path)
        .with_context(|| format!("Failed to load policy from {}", path.display()))?;
    Policy::try_from(config)
        .with_context(|| format!("Invalid policy in {}", path.display()))
}

/// Populate the registry before the server starts taking requests.
///
/// A policy file replaces the stock groups entirely. Unreachable
/// permissions are logged, not fatal: staff can still perform those actions.
pub fn provision(registry: &PolicyRegistry, policy_path: Option<&Path>) -> Result<Arc<Policy>> {
    let policy = match policy_path {
        Some(path) => {
            info!(path = %path.display(), "Loading authorization policy file");
            let policy = load_policy_file(path)?;
            registry.install(policy);
            registry.snapshot()
        }
        None => {
            info!("Seeding default authorization groups");
            seed_default_groups(registry)
        }
    };

    if let Err(e) = policy.validate() {
        warn!(error = %e, "Some actions are reachable only by staff");
    }

    Ok(policy)
}
