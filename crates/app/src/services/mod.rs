//! Service layer: the former screens as typed operations.
//!
//! Structured like:
//! - `admin.rs`: member administration, billing, reports, gym info
//! - `member.rs`: the member's own dashboard and bills
//! - `user.rs`: public gym content and record search
//!
//! Every operation re-checks the session role before touching a store, so
//! the services fail closed even if a caller skips the navigator.

use std::sync::Arc;

use fitdesk_auth::{Role, Session};
use fitdesk_identity::SessionHandle;
use fitdesk_infra::{BillStore, CredentialAdmin, GymInfoStore, MembershipStore, UserDirectory};

use crate::error::AppError;

pub mod admin;
pub mod member;
pub mod user;

pub use admin::AdminService;
pub use member::MemberService;
pub use user::UserService;

/// Shared wiring handed to every service.
pub struct AppServices {
    pub directory: Arc<dyn UserDirectory>,
    pub memberships: Arc<dyn MembershipStore>,
    pub bills: Arc<dyn BillStore>,
    pub gym_info: Arc<dyn GymInfoStore>,
    pub credentials: Arc<dyn CredentialAdmin>,
    pub session: SessionHandle,
}

/// The session must be settled, authenticated, and hold exactly `role`.
pub(crate) fn require_role(handle: &SessionHandle, role: Role) -> Result<Session, AppError> {
    let snapshot = handle.current();
    if snapshot.loading {
        return Err(AppError::SessionLoading);
    }
    let Some(session) = snapshot.session else {
        return Err(AppError::Forbidden("not signed in".into()));
    };
    if snapshot.role != Some(role) {
        return Err(AppError::Forbidden(format!("requires the {role} role")));
    }
    Ok(session)
}

/// The session must be settled, authenticated, and hold any assigned role.
pub(crate) fn require_assigned(handle: &SessionHandle) -> Result<(Session, Role), AppError> {
    let snapshot = handle.current();
    if snapshot.loading {
        return Err(AppError::SessionLoading);
    }
    let Some(session) = snapshot.session else {
        return Err(AppError::Forbidden("not signed in".into()));
    };
    let Some(role) = snapshot.role else {
        return Err(AppError::Forbidden("no role assigned".into()));
    };
    Ok((session, role))
}
