use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fitdesk_core::{DocumentId, Entity, IdentityId};

/// Billing cadence of a membership plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl core::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership lifecycle. New memberships start active; the record is
/// deleted outright when the member is removed, so `Cancelled` only appears
/// in documents written by other tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Cancelled,
}

/// A member's plan subscription document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: DocumentId,
    pub identity_id: IdentityId,
    pub plan: PlanKind,
    pub fee_cents: i64,
    pub start_date: NaiveDate,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new_active(
        id: DocumentId,
        identity_id: IdentityId,
        plan: PlanKind,
        fee_cents: i64,
        start_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            identity_id,
            plan,
            fee_cents,
            start_date,
            status: MembershipStatus::Active,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

impl Entity for Membership {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memberships_start_active() {
        let membership = Membership::new_active(
            DocumentId::random(),
            IdentityId::new("uid-1"),
            PlanKind::Quarterly,
            15000,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Utc::now(),
        );
        assert!(membership.is_active());
        assert_eq!(membership.plan.as_str(), "quarterly");
    }

    #[test]
    fn plan_kinds_use_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&PlanKind::Yearly).unwrap(),
            "\"yearly\""
        );
        let plan: PlanKind = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(plan, PlanKind::Monthly);
    }
}
