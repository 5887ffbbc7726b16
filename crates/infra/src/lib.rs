//! `fitdesk-infra` — capability interfaces over the hosted services, plus
//! in-memory implementations for tests and development.
//!
//! The hosted document store and authentication provider are opaque
//! external services; this crate defines the narrow surfaces the rest of
//! the system consumes and provides `InMemory*` implementations in the
//! same shape (`RwLock<HashMap>` behind a trait object).

use thiserror::Error;

pub mod bills;
pub mod credentials;
pub mod directory;
pub mod gym_info;
pub mod memberships;
pub mod provider;

pub use bills::{BillStore, InMemoryBillStore};
pub use credentials::{CredentialAdmin, CredentialError, InMemoryCredentialAdmin, ProvisionedAccount};
pub use directory::{DirectoryRecord, InMemoryUserDirectory, UserDirectory};
pub use gym_info::{GymInfoStore, InMemoryGymInfoStore};
pub use memberships::{InMemoryMembershipStore, MembershipStore};
pub use provider::InMemoryAuthProvider;

/// Store-level failure, distinct from domain errors: the caller asked a
/// well-formed question and the store could not answer it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}
