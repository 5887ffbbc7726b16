use thiserror::Error;

use fitdesk_billing::ReportError;
use fitdesk_core::DomainError;
use fitdesk_identity::ProviderError;
use fitdesk_infra::{CredentialError, StoreError};

/// Application-layer error: everything a service call can surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// The session does not permit this operation (fail-closed at the
    /// service boundary, mirroring the gate).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The resolver has not settled; the caller should retry after the
    /// snapshot changes rather than treat this as a denial.
    #[error("session is still resolving")]
    SessionLoading,
}
