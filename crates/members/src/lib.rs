//! Members domain module: profiles, membership plans, directory search.
//!
//! Pure, deterministic domain logic (no IO, no HTTP, no storage). The
//! hosted record store is reached through capability traits defined in the
//! infrastructure crate.

pub mod member;
pub mod membership;
pub mod search;

pub use member::{MemberProfile, MemberUpdate, NewMember};
pub use membership::{Membership, MembershipStatus, PlanKind};
pub use search::{matches_query, RecordView};
