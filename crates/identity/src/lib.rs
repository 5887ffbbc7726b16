//! `fitdesk-identity` — the identity resolver.
//!
//! Bridges the authentication provider's asynchronous session-change
//! notifications into a single published `(session, role, loading)` snapshot
//! that the authorization gate and all dependents read. Owns the one live
//! snapshot; everything else holds read-only handles.

pub mod provider;
pub mod records;
pub mod resolver;

pub use provider::{AuthProvider, ProviderError, ProviderSession, SessionChange};
pub use records::{LookupError, RoleStore};
pub use resolver::{IdentityResolver, SessionHandle};
