//! Request types for the payroll engine API.
//!
//! Hours arrive from forms as plain JSON numbers and contract types as free
//! text. Both are converted into domain types here, and every conversion
//! error surfaces before the service is called.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, ContractType, NewDailyEntry, WorkedHours};

/// Request body for `POST /contracts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Contract ID; generated when omitted.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// The user who holds the contract.
    pub user_id: Uuid,
    /// `"hourly"`, `"daily"` or `"monthly"`.
    pub contract_type: String,
    /// Base amount per hour, day or month.
    pub base_amount: Decimal,
    /// Overtime multiplier (at least 1).
    pub overtime_rate: Decimal,
    /// Night-work multiplier (at least 1).
    pub night_rate: Decimal,
    /// The employer's display name.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// The date the contract starts.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl TryFrom<ContractRequest> for Contract {
    type Error = EngineError;

    fn try_from(request: ContractRequest) -> Result<Self, Self::Error> {
        let contract = Contract {
            id: request.id.unwrap_or_else(Uuid::new_v4),
            user_id: request.user_id,
            contract_type: request.contract_type.parse::<ContractType>()?,
            base_amount: request.base_amount,
            overtime_rate: request.overtime_rate,
            night_rate: request.night_rate,
            employer_name: request.employer_name,
            start_date: request.start_date,
        };
        contract.validate()?;
        Ok(contract)
    }
}

/// Hours worked in a day, as entered on the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoursRequest {
    /// Regular hours.
    pub regular_hours: f64,
    /// Overtime hours.
    pub overtime_hours: f64,
    /// Night hours; zero when omitted.
    #[serde(default)]
    pub night_hours: f64,
    /// Public holiday hours; zero when omitted.
    #[serde(default)]
    pub holiday_hours: f64,
}

impl HoursRequest {
    /// Converts the raw numbers into validated [`WorkedHours`].
    pub fn to_worked_hours(&self) -> EngineResult<WorkedHours> {
        WorkedHours::from_f64(
            self.regular_hours,
            self.overtime_hours,
            self.night_hours,
            self.holiday_hours,
        )
    }
}

/// Request body for `POST /wage/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagePreviewRequest {
    /// The contract to price the hours under.
    pub contract_id: Uuid,
    /// The hours to price.
    #[serde(flatten)]
    pub hours: HoursRequest,
}

/// Request body for `PUT /entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntryRequest {
    /// The user who worked the hours.
    pub user_id: Uuid,
    /// The contract the hours were worked under.
    pub contract_id: Uuid,
    /// The calendar date worked.
    pub date: NaiveDate,
    /// The hours worked.
    #[serde(flatten)]
    pub hours: HoursRequest,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl DailyEntryRequest {
    /// Converts the request into a [`NewDailyEntry`], validating the hours.
    pub fn into_new_entry(self) -> EngineResult<NewDailyEntry> {
        Ok(NewDailyEntry {
            user_id: self.user_id,
            contract_id: self.contract_id,
            date: self.date,
            hours: self.hours.to_worked_hours()?,
            notes: self.notes,
        })
    }
}

/// Query string for `GET /reports/...`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Whether the unhealthy-environment bonus applies.
    #[serde(default)]
    pub unhealthy: bool,
}
