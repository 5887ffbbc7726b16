//! The authorization gate.
//!
//! Evaluated once per navigation attempt, never persisted. The decision is a
//! pure function of the published snapshot and the route requirement.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)
//!
//! Fail-closed: any uncertainty about the role (record missing, lookup
//! failed, unrecognized value) routes to login, the least-privileged
//! outcome. Only the diagnostics differ per failure kind, and those live in
//! the identity resolver, not here.

use serde::{Deserialize, Serialize};

use crate::{Role, SessionSnapshot};

/// Declared constraint attached to a protected destination.
///
/// `required_role: None` marks a public route that is still evaluated by the
/// gate (an unauthenticated or role-less session is redirected regardless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    pub required_role: Option<Role>,
}

impl RouteRequirement {
    pub fn public() -> Self {
        Self {
            required_role: None,
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }
}

/// Where a denied navigation is sent instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Login,
    AdminHome,
    MemberHome,
    UserHome,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The resolver has not settled; suspend the decision, render a neutral
    /// waiting state. This is not a redirect.
    Pending,
    /// Render the requested destination.
    Allow,
    /// Do not render the requested destination; go here instead.
    Redirect(Destination),
}

/// Fixed role→home lookup table.
///
/// Unassigned sessions never reach this table; the gate routes them to
/// login before consulting it.
pub fn home_destination(role: Role) -> Destination {
    match role {
        Role::Admin => Destination::AdminHome,
        Role::Member => Destination::MemberHome,
        Role::User => Destination::UserHome,
    }
}

/// Decide whether the current session may proceed to a destination with the
/// given requirement, and if not, where to redirect.
pub fn authorize(snapshot: &SessionSnapshot, requirement: &RouteRequirement) -> AccessDecision {
    if snapshot.loading {
        return AccessDecision::Pending;
    }

    if !snapshot.is_authenticated() {
        return AccessDecision::Redirect(Destination::Login);
    }

    // Authenticated but role absent: unauthenticated-equivalent, even for
    // public requirements routed through the gate.
    let Some(role) = snapshot.role else {
        return AccessDecision::Redirect(Destination::Login);
    };

    match requirement.required_role {
        None => AccessDecision::Allow,
        Some(required) if required == role => AccessDecision::Allow,
        Some(_) => AccessDecision::Redirect(home_destination(role)),
    }
}
