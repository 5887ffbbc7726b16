//! Channel-backed authentication provider for tests and development.
//!
//! Mirrors the hosted provider's contract: every subscriber immediately
//! receives the current session state, then every subsequent change, in
//! order. Dead subscribers are pruned while publishing.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use fitdesk_core::IdentityId;
use fitdesk_identity::{AuthProvider, ProviderError, ProviderSession, SessionChange};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    subscribers: Mutex<Vec<mpsc::Sender<SessionChange>>>,
    current: Mutex<SessionChange>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a signed-in change (credential exchange completed).
    pub fn sign_in(&self, subject: &str, display_name: Option<&str>, email: Option<&str>) {
        self.publish(Some(ProviderSession {
            subject: IdentityId::new(subject),
            display_name: display_name.map(str::to_string),
            email: email.map(str::to_string),
        }));
    }

    /// Emit the absent marker (logout or provider-side invalidation).
    pub fn invalidate(&self) {
        self.publish(None);
    }

    fn publish(&self, change: SessionChange) {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = change.clone();

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        subscribers.retain(|tx| match tx.try_send(change.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
            Err(mpsc::error::TrySendError::Full(_)) => {
                // Keep the subscriber; only this change is lost to it.
                warn!("session-change subscriber is not draining; dropping one event");
                true
            }
        });
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn subscribe(&self) -> Result<mpsc::Receiver<SessionChange>, ProviderError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        // A fresh channel cannot be full; deliver the current state first.
        let current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        tx.try_send(current)
            .map_err(|_| ProviderError::Unavailable("subscriber channel rejected".into()))?;

        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);

        Ok(rx)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.publish(None);
        Ok(())
    }
}
