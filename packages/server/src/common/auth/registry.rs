use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::{AuthorizationGate, Policy};

/// Holds the process-wide policy.
///
/// Readers take an `Arc` snapshot and never observe a half-written policy.
/// Writers replace the whole policy under the write lock. A fresh registry
/// holds [`Policy::empty`], so a gate handed out before seeding denies
/// everything except staff.
#[derive(Debug)]
pub struct PolicyRegistry {
    current: RwLock<Arc<Policy>>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::with_policy(Policy::empty())
    }

    pub fn with_policy(policy: Policy) -> Self {
        Self {
            current: RwLock::new(Arc::new(policy)),
        }
    }

    pub fn snapshot(&self) -> Arc<Policy> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A gate bound to the current snapshot.
    pub fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(self.snapshot())
    }

    /// Replace the policy, returning the previous one.
    pub fn install(&self, policy: Policy) -> Arc<Policy> {
        self.update(|_| policy)
    }

    /// Compute a new policy from the current one while holding the write
    /// lock, so concurrent writers serialize. Returns the previous policy.
    pub fn update(&self, f: impl FnOnce(&Policy) -> Policy) -> Arc<Policy> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(f(&**current));
        info!(
            roles = next.roles().count(),
            public_kinds = next.public_kinds().count(),
            "Installing authorization policy"
        );
        std::mem::replace(&mut *current, next)
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
