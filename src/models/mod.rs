//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod contract;
mod daily_entry;
mod hours;
mod monthly_summary;
mod pay_components;
mod payroll_report;

pub use audit::{AuditStep, AuditTrace};
pub use contract::{Contract, ContractType};
pub use daily_entry::{DailyEntry, EntryKey, NewDailyEntry};
pub use hours::{HourCategory, WorkedHours};
pub use monthly_summary::{MonthlySummary, SummaryKey};
pub use pay_components::PayComponents;
pub use payroll_report::PayrollReport;
