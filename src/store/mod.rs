//! Persistence contract for contracts, daily entries and monthly summaries.
//!
//! The engine never talks to a database directly. Everything it reads or
//! writes goes through [`EntryStore`], so the same service logic runs against
//! the in-memory store used by the server and tests, or any other backend.
//!
//! Implementations must honour two uniqueness keys:
//! - one [`DailyEntry`] per [`EntryKey`] (`user_id`, `contract_id`, `date`)
//! - one [`MonthlySummary`] per [`SummaryKey`] (`user_id`, `contract_id`, `month`, `year`)
//!
//! Upserting on an existing key overwrites the stored row.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Contract, DailyEntry, EntryKey, MonthlySummary, SummaryKey};

pub use memory::InMemoryEntryStore;

/// Storage operations the payroll service depends on.
///
/// Backend failures are reported as
/// [`EngineError::StoreUnavailable`](crate::error::EngineError::StoreUnavailable);
/// a write that loses a race on a uniqueness key may be reported as
/// [`EngineError::Conflict`](crate::error::EngineError::Conflict).
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Looks up a contract by ID.
    ///
    /// Fails with `ContractNotFound` if no such contract exists.
    async fn read_contract(&self, contract_id: Uuid) -> EngineResult<Contract>;

    /// Creates or replaces a contract.
    async fn upsert_contract(&self, contract: Contract) -> EngineResult<Contract>;

    /// Returns the entries of one user and contract in a calendar month,
    /// ordered by date.
    async fn read_entries_for_month(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<Vec<DailyEntry>>;

    /// Inserts an entry, or overwrites the entry with the same [`EntryKey`].
    ///
    /// An overwrite keeps the stored row's `id`. Returns the row as stored.
    async fn upsert_entry(&self, entry: DailyEntry) -> EngineResult<DailyEntry>;

    /// Removes the entry with the given key, returning it if it existed.
    async fn delete_entry(&self, key: EntryKey) -> EngineResult<Option<DailyEntry>>;

    /// Inserts a summary, or overwrites the summary with the same [`SummaryKey`].
    async fn upsert_monthly_summary(&self, summary: MonthlySummary)
    -> EngineResult<MonthlySummary>;

    /// Returns the stored summary for the given key, if any.
    async fn read_monthly_summary(&self, key: SummaryKey) -> EngineResult<Option<MonthlySummary>>;
}
