//! In-memory persistence collaborator.
//!
//! Handlers fetch an item, ask the gate, and only then mutate. The store
//! itself knows nothing about authorization.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::auth::Resource;
use crate::common::Id;

/// A stored content item.
pub trait Content: Clone + Send + Sync + 'static {
    type Marker: Send + Sync + 'static;

    fn id(&self) -> Id<Self::Marker>;

    /// The authorization view of this item.
    fn resource(&self) -> Resource;
}

/// Thread-safe map of content items keyed by id.
///
/// Ids are v7 UUIDs, so iteration order is creation order.
pub struct ContentStore<T: Content> {
    items: Arc<RwLock<BTreeMap<Id<T::Marker>, T>>>,
}

impl<T: Content> ContentStore<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub async fn insert(&self, item: T) -> T {
        let mut items = self.items.write().await;
        items.insert(item.id(), item.clone());
        item
    }

    pub async fn get(&self, id: Id<T::Marker>) -> Option<T> {
        self.items.read().await.get(&id).cloned()
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.values().cloned().collect()
    }

    /// Items matching `predicate`, in creation order.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .await
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Apply `f` to the item in place. Returns the updated item, or `None`
    /// if it no longer exists.
    pub async fn update(&self, id: Id<T::Marker>, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id)?;
        f(item);
        Some(item.clone())
    }

    pub async fn remove(&self, id: Id<T::Marker>) -> Option<T> {
        self.items.write().await.remove(&id)
    }

    /// Remove every item matching `predicate`, returning how many were dropped.
    pub async fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|_, item| !predicate(item));
        before - items.len()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

impl<T: Content> Clone for ContentStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: Content> Default for ContentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
