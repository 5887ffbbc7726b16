//! Administrator operations: member lifecycle, billing, reports, gym info.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use fitdesk_auth::Role;
use fitdesk_billing::{self as billing, Bill, NewBill};
use fitdesk_core::{DocumentId, DomainError, IdentityId};
use fitdesk_gym::GymInfo;
use fitdesk_infra::DirectoryRecord;
use fitdesk_members::{MemberProfile, MemberUpdate, Membership, NewMember};

use crate::error::AppError;
use crate::services::{require_role, AppServices};

/// Result of the add-member flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedMember {
    pub identity_id: IdentityId,
    pub email: String,
}

/// A member row on the admin list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOverview {
    pub profile: MemberProfile,
    pub membership: Option<Membership>,
}

/// The admin dashboard numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminDashboard {
    pub total_members: usize,
    pub active_members: usize,
    pub pending_payments: usize,
    pub total_revenue_cents: i64,
}

pub struct AdminService {
    ctx: Arc<AppServices>,
}

impl AdminService {
    pub fn new(ctx: Arc<AppServices>) -> Self {
        Self { ctx }
    }

    /// Provision a member end-to-end: credential with a temporary password,
    /// profile document with the member role, membership document, and a
    /// password-reset notice so the member sets their own password.
    pub async fn add_member(&self, new: NewMember) -> Result<AddedMember, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;
        new.validate()?;

        let email = new.email.clone();
        let plan = new.plan;
        let fee_cents = new.fee_cents;
        let join_date = new.join_date;

        let account = self.ctx.credentials.create_account(&email).await?;
        let created_at = Utc::now();

        let profile = new.into_profile(account.identity_id.clone(), created_at);
        self.ctx
            .directory
            .insert(DirectoryRecord {
                profile,
                role: Role::Member.as_str().to_string(),
            })
            .await?;

        self.ctx
            .memberships
            .insert(Membership::new_active(
                DocumentId::random(),
                account.identity_id.clone(),
                plan,
                fee_cents,
                join_date,
                created_at,
            ))
            .await?;

        self.ctx.credentials.send_password_reset(&email).await?;

        info!(identity = %account.identity_id, %email, "member provisioned; reset notice sent");
        Ok(AddedMember {
            identity_id: account.identity_id,
            email,
        })
    }

    /// All member profiles joined with their membership documents,
    /// ordered by name.
    pub async fn list_members(&self) -> Result<Vec<MemberOverview>, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;

        let records = self
            .ctx
            .directory
            .list_with_role(Role::Member.as_str())
            .await?;

        let mut members = Vec::with_capacity(records.len());
        for record in records {
            let membership = self
                .ctx
                .memberships
                .find_for(&record.profile.identity_id)
                .await?;
            members.push(MemberOverview {
                profile: record.profile,
                membership,
            });
        }

        members.sort_by(|a, b| a.profile.name.cmp(&b.profile.name));
        Ok(members)
    }

    /// Apply the edit form: profile fields plus plan/fee.
    pub async fn update_member(
        &self,
        identity: &IdentityId,
        update: MemberUpdate,
    ) -> Result<(), AppError> {
        require_role(&self.ctx.session, Role::Admin)?;
        update.validate()?;

        let mut record = self
            .ctx
            .directory
            .get(identity)
            .await?
            .ok_or(AppError::Domain(DomainError::NotFound))?;
        update.apply_to(&mut record.profile);
        self.ctx.directory.update(record).await?;

        if let Some(mut membership) = self.ctx.memberships.find_for(identity).await? {
            membership.plan = update.plan;
            membership.fee_cents = update.fee_cents;
            self.ctx.memberships.update(membership).await?;
        }

        Ok(())
    }

    /// Delete the member's profile and membership. Issued bills stay in the
    /// store for the books.
    pub async fn remove_member(&self, identity: &IdentityId) -> Result<(), AppError> {
        require_role(&self.ctx.session, Role::Admin)?;

        self.ctx.directory.remove(identity).await?;
        self.ctx.memberships.remove_for(identity).await?;
        info!(identity = %identity, "member removed");
        Ok(())
    }

    /// Issue a bill to a member, denormalizing name and email onto it.
    pub async fn create_bill(
        &self,
        identity: &IdentityId,
        new: NewBill,
    ) -> Result<Bill, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;
        new.validate()?;

        let record = self
            .ctx
            .directory
            .get(identity)
            .await?
            .ok_or(AppError::Domain(DomainError::NotFound))?;

        let bill = new.into_bill(
            DocumentId::random(),
            identity.clone(),
            record.profile.name,
            record.profile.email,
            Utc::now(),
        );
        self.ctx.bills.insert(bill.clone()).await?;

        info!(bill = %bill.id, identity = %identity, "bill created");
        Ok(bill)
    }

    pub async fn dashboard(&self) -> Result<AdminDashboard, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;

        let members = self
            .ctx
            .directory
            .list_with_role(Role::Member.as_str())
            .await?;

        let mut active_members = 0;
        for record in &members {
            let membership = self
                .ctx
                .memberships
                .find_for(&record.profile.identity_id)
                .await?;
            if membership.is_some_and(|m| m.is_active()) {
                active_members += 1;
            }
        }

        let bills = self.ctx.bills.list_all().await?;
        let totals = billing::totals(&bills);

        Ok(AdminDashboard {
            total_members: members.len(),
            active_members,
            pending_payments: totals.pending_count,
            total_revenue_cents: totals.revenue_cents,
        })
    }

    /// The full bill report as CSV, newest due date first.
    pub async fn bill_report_csv(&self) -> Result<String, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;

        let mut bills = self.ctx.bills.list_all().await?;
        billing::sort_by_due_date_desc(&mut bills);
        Ok(billing::csv_string(&bills)?)
    }

    pub async fn gym_info(&self) -> Result<Option<GymInfo>, AppError> {
        require_role(&self.ctx.session, Role::Admin)?;
        Ok(self.ctx.gym_info.get().await?)
    }

    /// Upsert the gym information document.
    pub async fn save_gym_info(&self, info: GymInfo) -> Result<(), AppError> {
        require_role(&self.ctx.session, Role::Admin)?;
        info.validate()?;
        self.ctx.gym_info.save(info).await?;
        Ok(())
    }
}
