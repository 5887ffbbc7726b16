use serde::{Deserialize, Serialize};

use fitdesk_core::{DomainError, DomainResult};

/// Opening hours, one free-form entry per weekday ("06:00–22:00", "closed").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekHours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

/// A plan as advertised on the public page (distinct from a member's actual
/// subscription).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOffering {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration: String,
}

/// The gym's single information document. Saved as an upsert: there is at
/// most one of these in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymInfo {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub announcement: String,
    pub hours: WeekHours,
    pub features: Vec<String>,
    pub plans: Vec<PlanOffering>,
}

impl GymInfo {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("gym name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("gym description is required"));
        }
        for plan in &self.plans {
            if plan.name.trim().is_empty() {
                return Err(DomainError::validation("plan name must not be empty"));
            }
            if plan.price_cents < 0 {
                return Err(DomainError::validation("plan price must not be negative"));
            }
        }
        Ok(())
    }

    pub fn add_feature(&mut self, feature: &str) {
        let trimmed = feature.trim();
        if !trimmed.is_empty() {
            self.features.push(trimmed.to_string());
        }
    }

    pub fn remove_feature(&mut self, index: usize) {
        if index < self.features.len() {
            self.features.remove(index);
        }
    }
}
