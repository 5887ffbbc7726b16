//! `fitdesk-app` — application shell.
//!
//! Wires the identity resolver and the capability stores together, owns the
//! route table the gate evaluates against, and exposes the former screens
//! as typed service calls (admin, member, user). No UI and no HTTP live
//! here; the surrounding shell renders whatever these services return.

pub mod config;
pub mod error;
pub mod nav;
pub mod routes;
pub mod services;

pub use config::AppConfig;
pub use error::AppError;
pub use nav::{NavigationOutcome, Navigator};
pub use routes::{destination_path, RouteTable};
pub use services::{AdminService, AppServices, MemberService, UserService};
