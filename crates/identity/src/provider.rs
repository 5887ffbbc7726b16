//! Authentication provider capability.
//!
//! The provider is an external hosted service; this crate only sees its
//! session-change event stream and a sign-out entry point.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use fitdesk_core::IdentityId;

/// A provider-confirmed session, as delivered by the change stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// The provider's stable subject identifier.
    pub subject: IdentityId,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// One session-change notification: a populated session or the absent
/// marker. The provider fires these at unpredictable times (initial load,
/// credential exchange, logout, token expiry).
pub type SessionChange = Option<ProviderSession>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The change-stream subscription could not be established. The
    /// resolver treats this as permanently unauthenticated.
    #[error("authentication provider unavailable: {0}")]
    Unavailable(String),

    /// The provider rejected a sign-out request.
    #[error("sign-out rejected: {0}")]
    SignOutRejected(String),
}

/// Subscription + sign-out surface of the hosted authentication provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Subscribe to session changes. Implementations deliver the current
    /// state as the first event and every subsequent change after that.
    async fn subscribe(&self) -> Result<mpsc::Receiver<SessionChange>, ProviderError>;

    /// End the current session provider-side. The resulting signed-out
    /// state arrives through the change stream, not as a return value.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
