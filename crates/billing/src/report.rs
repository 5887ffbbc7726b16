//! Bill report export.
//!
//! Serializes the full bill set to CSV with a stable column order, the
//! export format behind the admin reports screen.

use std::io;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::bill::{format_cents, Bill};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to finish report: {0}")]
    Flush(#[from] io::Error),
}

/// One exported row. Column order is the struct field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct BillReportRow<'a> {
    member_email: &'a str,
    member_name: &'a str,
    description: &'a str,
    amount: String,
    due_date: NaiveDate,
    status: &'a str,
}

impl<'a> From<&'a Bill> for BillReportRow<'a> {
    fn from(bill: &'a Bill) -> Self {
        Self {
            member_email: &bill.member_email,
            member_name: &bill.member_name,
            description: &bill.description,
            amount: format_cents(bill.amount_cents),
            due_date: bill.due_date,
            status: bill.status.as_str(),
        }
    }
}

/// Write the report (header plus one row per bill) to `writer`.
pub fn write_csv<W: io::Write>(bills: &[Bill], writer: W) -> Result<(), ReportError> {
    let mut out = csv::Writer::from_writer(writer);
    for bill in bills {
        out.serialize(BillReportRow::from(bill))?;
    }
    out.flush()?;
    Ok(())
}

/// The report as an in-memory string (what the download handler ships).
pub fn csv_string(bills: &[Bill]) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_csv(bills, &mut buffer)?;
    // The writer only emits what we serialized, which is valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
