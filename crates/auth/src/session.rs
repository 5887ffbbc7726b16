use serde::{Deserialize, Serialize};

use fitdesk_core::IdentityId;

use crate::Role;

/// The current authenticated principal, if any.
///
/// A `Session` is created when the provider confirms a credential and
/// destroyed on logout or provider-side invalidation. It is replaced
/// wholesale on every provider state change, never mutated field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity_id: IdentityId,
    display_name: Option<String>,
}

impl Session {
    pub fn new(identity_id: IdentityId, display_name: Option<String>) -> Self {
        Self {
            identity_id,
            display_name,
        }
    }

    pub fn identity_id(&self) -> &IdentityId {
        &self.identity_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// The authorization role bound to an identity, as fetched from the user
/// record store. At most one record exists per identity; `role: None` means
/// the account is unassigned (or the stored attribute was unrecognized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub identity_id: IdentityId,
    pub role: Option<Role>,
}

/// The single live `(session, role, loading)` triple published by the
/// identity resolver.
///
/// Exactly one snapshot is live at a time; the resolver replaces it
/// atomically (last event wins). `loading` is cleared only after `session`
/// and `role` are settled, so no consumer can observe a non-loading snapshot
/// with stale role data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub role: Option<Role>,
    pub loading: bool,
}

impl SessionSnapshot {
    /// Initial state: nothing known yet, provider has not reported.
    pub fn loading() -> Self {
        Self {
            session: None,
            role: None,
            loading: true,
        }
    }

    /// Settled state with no authenticated principal.
    pub fn signed_out() -> Self {
        Self {
            session: None,
            role: None,
            loading: false,
        }
    }

    /// A signed-in principal whose role lookup is still in flight.
    pub fn settling(session: Session) -> Self {
        Self {
            session: Some(session),
            role: None,
            loading: true,
        }
    }

    /// Fully settled state for a signed-in principal.
    pub fn settled(session: Session, role: Option<Role>) -> Self {
        Self {
            session: Some(session),
            role,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn identity_id(&self) -> Option<&IdentityId> {
        self.session.as_ref().map(Session::identity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_constructors_settle_the_loading_flag_last() {
        let session = Session::new(IdentityId::new("uid-1"), Some("Ada".into()));

        assert!(SessionSnapshot::loading().loading);
        assert!(SessionSnapshot::settling(session.clone()).loading);
        assert!(!SessionSnapshot::signed_out().loading);
        assert!(!SessionSnapshot::settled(session, Some(Role::Member)).loading);
    }

    #[test]
    fn settling_never_carries_a_role() {
        let session = Session::new(IdentityId::new("uid-1"), None);
        let snapshot = SessionSnapshot::settling(session);
        assert_eq!(snapshot.role, None);
        assert!(snapshot.is_authenticated());
    }
}
