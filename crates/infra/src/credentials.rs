//! Credential administration on the authentication provider.
//!
//! The add-member flow provisions an account with a generated temporary
//! password and immediately issues a password-reset notice, so the member
//! sets their own password on first contact and the temporary one never
//! circulates.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;
use uuid::Uuid;

use fitdesk_core::IdentityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("an account already exists for {0}")]
    DuplicateEmail(String),

    #[error("no account exists for {0}")]
    UnknownEmail(String),

    #[error("credential service unavailable: {0}")]
    Unavailable(String),
}

/// A freshly provisioned account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedAccount {
    pub identity_id: IdentityId,
    /// Never shown to the admin; superseded by the reset flow.
    pub temporary_password: String,
}

#[async_trait]
pub trait CredentialAdmin: Send + Sync {
    /// Create an account keyed by email, with a generated temporary
    /// password. Returns the provider-issued identity.
    async fn create_account(&self, email: &str) -> Result<ProvisionedAccount, CredentialError>;

    /// Ask the provider to email a password-reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), CredentialError>;
}

/// In-memory credential admin for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCredentialAdmin {
    accounts: RwLock<HashMap<String, IdentityId>>,
    reset_notices: RwLock<Vec<String>>,
}

impl InMemoryCredentialAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails a reset notice has been issued for, in order (test hook).
    pub fn reset_notices(&self) -> Vec<String> {
        self.reset_notices
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

#[async_trait]
impl CredentialAdmin for InMemoryCredentialAdmin {
    async fn create_account(&self, email: &str) -> Result<ProvisionedAccount, CredentialError> {
        let key = email.trim().to_lowercase();
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if accounts.contains_key(&key) {
            return Err(CredentialError::DuplicateEmail(email.to_string()));
        }

        let identity_id = IdentityId::new(Uuid::new_v4().to_string());
        accounts.insert(key, identity_id.clone());

        Ok(ProvisionedAccount {
            identity_id,
            temporary_password: temporary_password(),
        })
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), CredentialError> {
        let key = email.trim().to_lowercase();
        let known = self
            .accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&key);
        if !known {
            return Err(CredentialError::UnknownEmail(email.to_string()));
        }

        self.reset_notices
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key);
        Ok(())
    }
}
