//! Daily entry model.
//!
//! A [`DailyEntry`] is one day's worked-hours record for a user under a
//! contract. Entries are keyed by [`EntryKey`]; saving the same day twice
//! overwrites the first record.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkedHours;

/// The upsert key of a daily entry: one row per user, contract and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey {
    /// The user who logged the hours.
    pub user_id: Uuid,
    /// The contract the hours were worked under.
    pub contract_id: Uuid,
    /// The calendar date worked.
    pub date: NaiveDate,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.user_id, self.contract_id, self.date)
    }
}

/// Input for saving a day's hours, before the wage has been computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDailyEntry {
    /// The user who logged the hours.
    pub user_id: Uuid,
    /// The contract the hours were worked under.
    pub contract_id: Uuid,
    /// The calendar date worked.
    pub date: NaiveDate,
    /// Hours worked, by category.
    #[serde(flatten)]
    pub hours: WorkedHours,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewDailyEntry {
    /// Returns the upsert key for this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            user_id: self.user_id,
            contract_id: self.contract_id,
            date: self.date,
        }
    }
}

/// One day's persisted worked-hours record.
///
/// `daily_wage` is the wage computed at save time, rounded to cents. It is a
/// cached value and is never used to build monthly summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Row identifier, preserved when the entry is overwritten.
    pub id: Uuid,
    /// The user who logged the hours.
    pub user_id: Uuid,
    /// The contract the hours were worked under.
    pub contract_id: Uuid,
    /// The calendar date worked.
    pub date: NaiveDate,
    /// Hours worked, by category.
    #[serde(flatten)]
    pub hours: WorkedHours,
    /// Gross pay for the day at save time.
    pub daily_wage: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl DailyEntry {
    /// Builds a persisted entry from the input and its computed wage.
    pub fn from_new(new_entry: NewDailyEntry, daily_wage: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: new_entry.user_id,
            contract_id: new_entry.contract_id,
            date: new_entry.date,
            hours: new_entry.hours,
            daily_wage,
            notes: new_entry.notes,
        }
    }

    /// Returns the upsert key for this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            user_id: self.user_id,
            contract_id: self.contract_id,
            date: self.date,
        }
    }

    /// Returns true if the entry belongs to the given user, contract and month.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{DailyEntry, WorkedHours};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let user_id = Uuid::new_v4();
    /// let contract_id = Uuid::new_v4();
    /// let entry = DailyEntry {
    ///     id: Uuid::new_v4(),
    ///     user_id,
    ///     contract_id,
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    ///     hours: WorkedHours::default(),
    ///     daily_wage: Decimal::ZERO,
    ///     notes: None,
    /// };
    ///
    /// assert!(entry.belongs_to(user_id, contract_id, 3, 2026));
    /// assert!(!entry.belongs_to(user_id, contract_id, 4, 2026));
    /// ```
    pub fn belongs_to(&self, user_id: Uuid, contract_id: Uuid, month: u32, year: i32) -> bool {
        self.user_id == user_id
            && self.contract_id == contract_id
            && self.date.month() == month
            && self.date.year() == year
    }
}
