//! The gym information singleton document.

use std::sync::RwLock;

use async_trait::async_trait;

use fitdesk_gym::GymInfo;

use crate::StoreError;

#[async_trait]
pub trait GymInfoStore: Send + Sync {
    async fn get(&self) -> Result<Option<GymInfo>, StoreError>;

    /// Upsert: creates the document on first save, replaces it afterwards.
    async fn save(&self, info: GymInfo) -> Result<(), StoreError>;
}

/// In-memory gym-info store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryGymInfoStore {
    inner: RwLock<Option<GymInfo>>,
}

impl InMemoryGymInfoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GymInfoStore for InMemoryGymInfoStore {
    async fn get(&self) -> Result<Option<GymInfo>, StoreError> {
        Ok(self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    async fn save(&self, info: GymInfo) -> Result<(), StoreError> {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_is_an_upsert() {
        let store = InMemoryGymInfoStore::new();
        assert!(store.get().await.unwrap().is_none());

        let mut info = GymInfo {
            name: "Iron Works".into(),
            description: "Strength and conditioning".into(),
            ..GymInfo::default()
        };
        store.save(info.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap().unwrap().name, "Iron Works");

        info.announcement = "Closed for maintenance on Sunday".into();
        store.save(info).await.unwrap();
        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.announcement, "Closed for maintenance on Sunday");
    }
}
