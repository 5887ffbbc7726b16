//! Member operations: the member's own dashboard and bills.

use std::sync::Arc;

use tracing::info;

use fitdesk_auth::Role;
use fitdesk_billing::{self as billing, Bill, BillFilter};
use fitdesk_core::{DocumentId, DomainError};
use fitdesk_members::{MemberProfile, Membership};

use crate::error::AppError;
use crate::services::{require_role, AppServices};

/// Everything the member dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDashboard {
    pub profile: MemberProfile,
    pub membership: Option<Membership>,
    /// All bills, most recent due date first.
    pub bills: Vec<Bill>,
    pub total_due_cents: i64,
    pub pending_count: usize,
}

pub struct MemberService {
    ctx: Arc<AppServices>,
}

impl MemberService {
    pub fn new(ctx: Arc<AppServices>) -> Self {
        Self { ctx }
    }

    pub async fn dashboard(&self) -> Result<MemberDashboard, AppError> {
        let session = require_role(&self.ctx.session, Role::Member)?;
        let identity = session.identity_id();

        let record = self
            .ctx
            .directory
            .get(identity)
            .await?
            .ok_or(AppError::Domain(DomainError::NotFound))?;
        let membership = self.ctx.memberships.find_for(identity).await?;

        let mut bills = self.ctx.bills.list_for(identity).await?;
        billing::sort_by_due_date_desc(&mut bills);
        let totals = billing::totals(&bills);

        Ok(MemberDashboard {
            profile: record.profile,
            membership,
            bills,
            total_due_cents: totals.outstanding_cents,
            pending_count: totals.pending_count,
        })
    }

    /// The member's bills, filtered by status, most recent due date first.
    pub async fn bills(&self, filter: BillFilter) -> Result<Vec<Bill>, AppError> {
        let session = require_role(&self.ctx.session, Role::Member)?;

        let mut bills = self.ctx.bills.list_for(session.identity_id()).await?;
        billing::sort_by_due_date_desc(&mut bills);
        Ok(billing::filter_bills(&bills, filter))
    }

    /// Settle one of the member's own pending bills.
    pub async fn pay_bill(&self, bill_id: &DocumentId) -> Result<Bill, AppError> {
        let session = require_role(&self.ctx.session, Role::Member)?;

        let mut bill = self
            .ctx
            .bills
            .get(bill_id)
            .await?
            .ok_or(AppError::Domain(DomainError::NotFound))?;

        if &bill.identity_id != session.identity_id() {
            return Err(AppError::Forbidden(
                "bill belongs to another member".into(),
            ));
        }

        bill.mark_paid()?;
        self.ctx.bills.update(bill.clone()).await?;

        info!(bill = %bill.id, "bill marked paid");
        Ok(bill)
    }
}
