//! `fitdesk-auth` — pure authorization boundary.
//!
//! This crate decides where a navigation attempt may go, as a pure function
//! of the published session snapshot and the route's role requirement. It is
//! intentionally decoupled from the authentication provider, the record
//! store, and any UI framework: no IO, no async, no hidden state.

pub mod gate;
pub mod roles;
pub mod session;

pub use gate::{authorize, home_destination, AccessDecision, Destination, RouteRequirement};
pub use roles::Role;
pub use session::{RoleRecord, Session, SessionSnapshot};
