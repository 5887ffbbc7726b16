//! User directory: profile documents keyed by identity, with the stored
//! role attribute. Doubles as the identity resolver's `RoleStore`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use fitdesk_auth::{Role, RoleRecord};
use fitdesk_core::IdentityId;
use fitdesk_identity::{LookupError, RoleStore};
use fitdesk_members::MemberProfile;

use crate::StoreError;

/// A user document as stored: the profile plus the raw role attribute.
///
/// The role stays a raw string here; parsing (and therefore the
/// unassigned-on-unknown rule) happens at the `RoleStore` boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub profile: MemberProfile,
    pub role: String,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn insert(&self, record: DirectoryRecord) -> Result<(), StoreError>;

    async fn get(&self, identity: &IdentityId) -> Result<Option<DirectoryRecord>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryRecord>, StoreError>;

    /// All records whose stored role attribute equals `role` exactly.
    async fn list_with_role(&self, role: &str) -> Result<Vec<DirectoryRecord>, StoreError>;

    async fn list_all(&self) -> Result<Vec<DirectoryRecord>, StoreError>;

    /// Replace an existing record. `NotFound` if the identity is unknown.
    async fn update(&self, record: DirectoryRecord) -> Result<(), StoreError>;

    /// `NotFound` if the identity is unknown.
    async fn remove(&self, identity: &IdentityId) -> Result<(), StoreError>;
}

/// In-memory directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<IdentityId, DirectoryRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<IdentityId, DirectoryRecord>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<IdentityId, DirectoryRecord>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, record: DirectoryRecord) -> Result<(), StoreError> {
        self.write()
            .insert(record.profile.identity_id.clone(), record);
        Ok(())
    }

    async fn get(&self, identity: &IdentityId) -> Result<Option<DirectoryRecord>, StoreError> {
        Ok(self.read().get(identity).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryRecord>, StoreError> {
        Ok(self
            .read()
            .values()
            .find(|record| record.profile.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_with_role(&self, role: &str) -> Result<Vec<DirectoryRecord>, StoreError> {
        Ok(self
            .read()
            .values()
            .filter(|record| record.role == role)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<DirectoryRecord>, StoreError> {
        Ok(self.read().values().cloned().collect())
    }

    async fn update(&self, record: DirectoryRecord) -> Result<(), StoreError> {
        let mut map = self.write();
        let key = record.profile.identity_id.clone();
        if !map.contains_key(&key) {
            return Err(StoreError::NotFound);
        }
        map.insert(key, record);
        Ok(())
    }

    async fn remove(&self, identity: &IdentityId) -> Result<(), StoreError> {
        match self.write().remove(identity) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryUserDirectory {
    async fn role_record(&self, identity: &IdentityId) -> Result<Option<RoleRecord>, LookupError> {
        Ok(self.read().get(identity).map(|record| RoleRecord {
            identity_id: identity.clone(),
            role: Role::parse(&record.role),
        }))
    }
}
