//! User record store capability (role lookups only).

use async_trait::async_trait;
use thiserror::Error;

use fitdesk_auth::RoleRecord;
use fitdesk_core::IdentityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Network/service failure while fetching the role record. The
    /// resolver logs it and settles with role absent; no automatic retry.
    #[error("role record lookup failed: {0}")]
    Unavailable(String),
}

/// Role-record lookup against the hosted user record store, keyed by the
/// same identifier space as the provider's subject id.
///
/// `Ok(None)` is the record-not-found case: a valid identity with no role
/// record, treated downstream as unassigned.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn role_record(&self, identity: &IdentityId) -> Result<Option<RoleRecord>, LookupError>;
}
