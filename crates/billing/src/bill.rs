use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fitdesk_core::{DocumentId, DomainError, DomainResult, Entity, IdentityId};

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

/// A bill issued to a member.
///
/// Member name and email are denormalized at creation time so the report
/// and list screens need no directory join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: DocumentId,
    pub identity_id: IdentityId,
    pub member_name: String,
    pub member_email: String,
    pub description: String,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// `Pending → Paid`. Paying an already-paid bill is a conflict.
    pub fn mark_paid(&mut self) -> DomainResult<()> {
        if self.status == BillStatus::Paid {
            return Err(DomainError::conflict("bill is already paid"));
        }
        self.status = BillStatus::Paid;
        Ok(())
    }
}

impl Entity for Bill {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for the create-bill form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    pub description: String,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
}

impl NewBill {
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description must not be empty"));
        }
        if self.amount_cents <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(())
    }

    pub fn into_bill(
        self,
        id: DocumentId,
        identity_id: IdentityId,
        member_name: String,
        member_email: String,
        created_at: DateTime<Utc>,
    ) -> Bill {
        Bill {
            id,
            identity_id,
            member_name,
            member_email,
            description: self.description,
            amount_cents: self.amount_cents,
            due_date: self.due_date,
            status: self.status,
            created_at,
        }
    }
}

/// Status filter used by the member bills screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillFilter {
    All,
    Pending,
    Paid,
}

impl BillFilter {
    pub fn matches(&self, bill: &Bill) -> bool {
        match self {
            Self::All => true,
            Self::Pending => bill.status == BillStatus::Pending,
            Self::Paid => bill.status == BillStatus::Paid,
        }
    }
}

pub fn filter_bills(bills: &[Bill], filter: BillFilter) -> Vec<Bill> {
    bills
        .iter()
        .filter(|bill| filter.matches(bill))
        .cloned()
        .collect()
}

/// Most recent due date first (the member screen's ordering).
pub fn sort_by_due_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.due_date.cmp(&a.due_date));
}

/// Dashboard numbers derived from a bill set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BillTotals {
    /// Sum of paid bills.
    pub revenue_cents: i64,
    /// Sum of pending bills.
    pub outstanding_cents: i64,
    pub pending_count: usize,
}

pub fn totals(bills: &[Bill]) -> BillTotals {
    let mut acc = BillTotals::default();
    for bill in bills {
        match bill.status {
            BillStatus::Paid => acc.revenue_cents += bill.amount_cents,
            BillStatus::Pending => {
                acc.outstanding_cents += bill.amount_cents;
                acc.pending_count += 1;
            }
        }
    }
    acc
}

/// Render minor units as a decimal string ("5000" → "50.00").
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
