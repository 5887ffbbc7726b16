//! Bill documents.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use fitdesk_billing::Bill;
use fitdesk_core::{DocumentId, IdentityId};

use crate::StoreError;

#[async_trait]
pub trait BillStore: Send + Sync {
    async fn insert(&self, bill: Bill) -> Result<(), StoreError>;

    async fn get(&self, id: &DocumentId) -> Result<Option<Bill>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Bill>, StoreError>;

    async fn list_for(&self, identity: &IdentityId) -> Result<Vec<Bill>, StoreError>;

    /// Replace an existing bill. `NotFound` if the id is unknown.
    async fn update(&self, bill: Bill) -> Result<(), StoreError>;
}

/// In-memory bill store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBillStore {
    inner: RwLock<HashMap<DocumentId, Bill>>,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<DocumentId, Bill>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<DocumentId, Bill>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn insert(&self, bill: Bill) -> Result<(), StoreError> {
        self.write().insert(bill.id.clone(), bill);
        Ok(())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Bill>, StoreError> {
        Ok(self.read().get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self.read().values().cloned().collect())
    }

    async fn list_for(&self, identity: &IdentityId) -> Result<Vec<Bill>, StoreError> {
        Ok(self
            .read()
            .values()
            .filter(|bill| &bill.identity_id == identity)
            .cloned()
            .collect())
    }

    async fn update(&self, bill: Bill) -> Result<(), StoreError> {
        let mut map = self.write();
        if !map.contains_key(&bill.id) {
            return Err(StoreError::NotFound);
        }
        map.insert(bill.id.clone(), bill);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitdesk_billing::{BillStatus, NewBill};

    fn bill(identity: &str, cents: i64) -> Bill {
        NewBill {
            description: "Monthly fee".into(),
            amount_cents: cents,
            due_date: "2025-04-01".parse().unwrap(),
            status: BillStatus::Pending,
        }
        .into_bill(
            DocumentId::random(),
            IdentityId::new(identity),
            "Ada Lovelace".into(),
            "ada@example.com".into(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn bills_are_scoped_per_member() {
        let store = InMemoryBillStore::new();
        store.insert(bill("uid-1", 5000)).await.unwrap();
        store.insert(bill("uid-1", 2500)).await.unwrap();
        store.insert(bill("uid-2", 9900)).await.unwrap();

        assert_eq!(store.list_for(&IdentityId::new("uid-1")).await.unwrap().len(), 2);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn updating_an_unknown_bill_is_not_found() {
        let store = InMemoryBillStore::new();
        let mut b = bill("uid-1", 5000);
        assert_eq!(store.update(b.clone()).await, Err(StoreError::NotFound));

        store.insert(b.clone()).await.unwrap();
        b.mark_paid().unwrap();
        store.update(b.clone()).await.unwrap();
        assert_eq!(
            store.get(&b.id).await.unwrap().unwrap().status,
            BillStatus::Paid
        );
    }
}
