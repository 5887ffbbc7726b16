//! Billing domain module: bills, totals, report export.
//!
//! Amounts are integer minor units (cents). All logic here is deterministic;
//! persistence lives behind the infrastructure crate's capability traits.

pub mod bill;
pub mod report;

pub use bill::{
    filter_bills, format_cents, sort_by_due_date_desc, totals, Bill, BillFilter, BillStatus,
    BillTotals, NewBill,
};
pub use report::{csv_string, write_csv, ReportError};
