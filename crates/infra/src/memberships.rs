//! Membership subscription documents.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use fitdesk_core::{DocumentId, IdentityId};
use fitdesk_members::Membership;

use crate::StoreError;

#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn insert(&self, membership: Membership) -> Result<(), StoreError>;

    /// A member has at most one membership document.
    async fn find_for(&self, identity: &IdentityId) -> Result<Option<Membership>, StoreError>;

    /// Replace an existing membership. `NotFound` if the id is unknown.
    async fn update(&self, membership: Membership) -> Result<(), StoreError>;

    /// Delete the member's membership document, if any.
    async fn remove_for(&self, identity: &IdentityId) -> Result<(), StoreError>;
}

/// In-memory membership store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    inner: RwLock<HashMap<DocumentId, Membership>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<DocumentId, Membership>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<DocumentId, Membership>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert(&self, membership: Membership) -> Result<(), StoreError> {
        self.write().insert(membership.id.clone(), membership);
        Ok(())
    }

    async fn find_for(&self, identity: &IdentityId) -> Result<Option<Membership>, StoreError> {
        Ok(self
            .read()
            .values()
            .find(|membership| &membership.identity_id == identity)
            .cloned())
    }

    async fn update(&self, membership: Membership) -> Result<(), StoreError> {
        let mut map = self.write();
        if !map.contains_key(&membership.id) {
            return Err(StoreError::NotFound);
        }
        map.insert(membership.id.clone(), membership);
        Ok(())
    }

    async fn remove_for(&self, identity: &IdentityId) -> Result<(), StoreError> {
        self.write()
            .retain(|_, membership| &membership.identity_id != identity);
        Ok(())
    }
}
