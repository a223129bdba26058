//! In-memory [`EntryStore`] implementation.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, DailyEntry, EntryKey, MonthlySummary, SummaryKey};

use super::EntryStore;

/// An [`EntryStore`] backed by maps behind `tokio` read-write locks.
///
/// Entries are held in a `BTreeMap` keyed by [`EntryKey`], so the entries of
/// one user and contract come back in date order.
///
/// # Example
///
/// ```
/// use payroll_engine::store::{EntryStore, InMemoryEntryStore};
/// use uuid::Uuid;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let store = InMemoryEntryStore::new();
///     let entries = store
///         .read_entries_for_month(Uuid::new_v4(), Uuid::new_v4(), 3, 2026)
///         .await
///         .unwrap();
///     assert!(entries.is_empty());
/// });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    contracts: RwLock<HashMap<Uuid, Contract>>,
    entries: RwLock<BTreeMap<EntryKey, DailyEntry>>,
    summaries: RwLock<HashMap<SummaryKey, MonthlySummary>>,
}

impl InMemoryEntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of daily entries currently stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Number of monthly summaries currently stored.
    pub async fn summary_count(&self) -> usize {
        self.summaries.read().await.len()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn read_contract(&self, contract_id: Uuid) -> EngineResult<Contract> {
        self.contracts
            .read()
            .await
            .get(&contract_id)
            .cloned()
            .ok_or(EngineError::ContractNotFound { contract_id })
    }

    async fn upsert_contract(&self, contract: Contract) -> EngineResult<Contract> {
        self.contracts
            .write()
            .await
            .insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn read_entries_for_month(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<Vec<DailyEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|entry| entry.belongs_to(user_id, contract_id, month, year))
            .cloned()
            .collect())
    }

    async fn upsert_entry(&self, mut entry: DailyEntry) -> EngineResult<DailyEntry> {
        let mut entries = self.entries.write().await;
        let key = entry.key();
        if let Some(existing) = entries.get(&key) {
            entry.id = existing.id;
        }
        entries.insert(key, entry.clone());
        Ok(entry)
    }

    async fn delete_entry(&self, key: EntryKey) -> EngineResult<Option<DailyEntry>> {
        Ok(self.entries.write().await.remove(&key))
    }

    async fn upsert_monthly_summary(
        &self,
        summary: MonthlySummary,
    ) -> EngineResult<MonthlySummary> {
        self.summaries
            .write()
            .await
            .insert(summary.key(), summary.clone());
        Ok(summary)
    }

    async fn read_monthly_summary(&self, key: SummaryKey) -> EngineResult<Option<MonthlySummary>> {
        Ok(self.summaries.read().await.get(&key).cloned())
    }
}
