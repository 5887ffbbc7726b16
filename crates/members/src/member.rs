use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fitdesk_core::{DomainError, DomainResult, Entity, IdentityId};

use crate::membership::PlanKind;

/// A member's profile document, keyed by the identity the authentication
/// provider issued at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub identity_id: IdentityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Entity for MemberProfile {
    type Id = IdentityId;

    fn id(&self) -> &Self::Id {
        &self.identity_id
    }
}

/// Input for registering a new member (the admin add-member form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub join_date: NaiveDate,
    pub plan: PlanKind,
    pub fee_cents: i64,
}

impl NewMember {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_empty("name", &self.name)?;
        validate_email(&self.email)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("address", &self.address)?;
        if self.fee_cents <= 0 {
            return Err(DomainError::validation("membership fee must be positive"));
        }
        Ok(())
    }

    pub fn into_profile(self, identity_id: IdentityId, created_at: DateTime<Utc>) -> MemberProfile {
        MemberProfile {
            identity_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            join_date: self.join_date,
            created_at,
        }
    }
}

/// Partial update applied from the admin member-list edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub plan: PlanKind,
    pub fee_cents: i64,
}

impl MemberUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("address", &self.address)?;
        if self.fee_cents <= 0 {
            return Err(DomainError::validation("membership fee must be positive"));
        }
        Ok(())
    }

    /// Apply the profile part of the update (plan/fee apply to the
    /// membership document separately).
    pub fn apply_to(&self, profile: &mut MemberProfile) {
        profile.name = self.name.clone();
        profile.phone = self.phone.clone();
        profile.address = self.address.clone();
    }
}

fn require_non_empty(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(DomainError::validation("email must contain '@'"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DomainError::validation("email is malformed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_member() -> NewMember {
        NewMember {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Analytical Way".into(),
            join_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            plan: PlanKind::Monthly,
            fee_cents: 5000,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(new_member().validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut member = new_member();
        member.name = "   ".into();
        assert!(matches!(
            member.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["ada", "@example.com", "ada@", "ada@nodot"] {
            let mut member = new_member();
            member.email = email.into();
            assert!(member.validate().is_err(), "accepted {email}");
        }
    }

    #[test]
    fn non_positive_fee_is_rejected() {
        let mut member = new_member();
        member.fee_cents = 0;
        assert!(member.validate().is_err());
        member.fee_cents = -100;
        assert!(member.validate().is_err());
    }

    #[test]
    fn update_touches_profile_fields_only() {
        let profile_before = new_member().into_profile(IdentityId::new("uid-1"), Utc::now());
        let mut profile = profile_before.clone();

        let update = MemberUpdate {
            name: "Ada L.".into(),
            phone: "555-0199".into(),
            address: "2 Engine Court".into(),
            plan: PlanKind::Yearly,
            fee_cents: 50000,
        };
        update.validate().unwrap();
        update.apply_to(&mut profile);

        assert_eq!(profile.name, "Ada L.");
        assert_eq!(profile.phone, "555-0199");
        assert_eq!(profile.address, "2 Engine Court");
        assert_eq!(profile.email, profile_before.email);
        assert_eq!(profile.join_date, profile_before.join_date);
    }
}
