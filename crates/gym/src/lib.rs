//! Gym information document: the public-facing profile an admin maintains
//! and the user dashboard renders.

pub mod info;

pub use info::{GymInfo, PlanOffering, WeekHours};
