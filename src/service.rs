//! Work-hours service.
//!
//! [`PayrollService`] ties the pure calculators to an [`EntryStore`]. Saving
//! a day runs validate, compute, upsert entry, recompute and upsert summary,
//! so the stored monthly summary always reflects the latest entries.
//!
//! There is no locking across the read-recompute-upsert sequence. Two saves
//! racing on the same month both recompute from what they read, and the last
//! summary written wins. Reads never serve a stored summary as is: they
//! recompute from the current entries and contract terms and replace the
//! stored row when it differs.

use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    DailyWageResult, build_payroll_report, compute_daily_wage, recompute_monthly_summary,
    round_to_cents,
};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Contract, DailyEntry, EntryKey, MonthlySummary, NewDailyEntry, PayrollReport, SummaryKey,
    WorkedHours,
};
use crate::store::EntryStore;

/// How many times an entry upsert is attempted when the store reports a
/// conflicting write on the same day.
pub const MAX_UPSERT_ATTEMPTS: u32 = 3;

/// The outcome of saving a day's hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntry {
    /// The entry as stored, with its cached daily wage.
    pub entry: DailyEntry,
    /// The monthly summary recomputed after the save.
    pub summary: MonthlySummary,
}

/// Orchestrates wage calculation and persistence for daily entries.
#[derive(Debug)]
pub struct PayrollService<S> {
    store: Arc<S>,
    rules: PayrollRules,
}

impl<S> Clone for PayrollService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rules: self.rules.clone(),
        }
    }
}

impl<S: EntryStore> PayrollService<S> {
    /// Creates a service over the given store and calculation rules.
    pub fn new(store: Arc<S>, rules: PayrollRules) -> Self {
        Self { store, rules }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the calculation rules in use.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Validates and stores a contract.
    pub async fn register_contract(&self, contract: Contract) -> EngineResult<Contract> {
        contract.validate()?;
        let contract = self.store.upsert_contract(contract).await?;
        info!(
            contract_id = %contract.id,
            user_id = %contract.user_id,
            contract_type = %contract.contract_type,
            "Contract registered"
        );
        Ok(contract)
    }

    /// Computes the wage a day's hours would earn, without writing anything.
    ///
    /// The returned result is exact; callers round for display.
    pub async fn preview_wage(
        &self,
        contract_id: Uuid,
        hours: &WorkedHours,
    ) -> EngineResult<DailyWageResult> {
        hours.validate()?;
        let contract = self.store.read_contract(contract_id).await?;
        compute_daily_wage(&contract, hours, &self.rules)
    }

    /// Saves (or overwrites) a day's hours and refreshes that month's summary.
    ///
    /// # Errors
    ///
    /// - `InvalidHours` if any category is negative, before any store call
    /// - `ContractNotFound` if the contract does not exist or belongs to
    ///   another user, before any write
    /// - `Conflict` if the upsert still conflicts after
    ///   [`MAX_UPSERT_ATTEMPTS`] attempts
    /// - `StoreUnavailable` if the store fails
    pub async fn save_entry(&self, new_entry: NewDailyEntry) -> EngineResult<SavedEntry> {
        new_entry.hours.validate()?;
        let contract = self
            .read_user_contract(new_entry.user_id, new_entry.contract_id)
            .await?;

        let wage = compute_daily_wage(&contract, &new_entry.hours, &self.rules)?;
        let daily_wage = round_to_cents(wage.wage);

        let entry = self
            .upsert_entry_with_retry(DailyEntry::from_new(new_entry, daily_wage))
            .await?;
        info!(
            entry_id = %entry.id,
            user_id = %entry.user_id,
            contract_id = %entry.contract_id,
            date = %entry.date,
            daily_wage = %entry.daily_wage,
            "Daily entry saved"
        );

        let summary = self
            .refresh_for(&contract, entry.user_id, entry.date.month(), entry.date.year())
            .await?;

        Ok(SavedEntry { entry, summary })
    }

    /// Deletes a day's entry and returns the refreshed monthly summary.
    ///
    /// Deleting an entry that does not exist is not an error.
    pub async fn delete_entry(&self, key: EntryKey) -> EngineResult<MonthlySummary> {
        let contract = self.read_user_contract(key.user_id, key.contract_id).await?;

        match self.store.delete_entry(key).await? {
            Some(entry) => info!(entry_id = %entry.id, key = %key, "Daily entry deleted"),
            None => debug!(key = %key, "No entry to delete"),
        }

        self.refresh_for(&contract, key.user_id, key.date.month(), key.date.year())
            .await
    }

    /// Recomputes and stores the summary for one user, contract and month.
    pub async fn refresh_monthly_summary(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<MonthlySummary> {
        summary_key(user_id, contract_id, month, year).validate()?;
        let contract = self.read_user_contract(user_id, contract_id).await?;
        self.refresh_for(&contract, user_id, month, year).await
    }

    /// Returns the summary for a month, recomputed from the stored entries
    /// and the current contract terms.
    ///
    /// The stored row is only rewritten when it is missing or differs from
    /// the recomputation, e.g. after the contract was re-registered with new
    /// terms.
    pub async fn monthly_summary(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<MonthlySummary> {
        let key = summary_key(user_id, contract_id, month, year);
        key.validate()?;
        let contract = self.read_user_contract(user_id, contract_id).await?;

        let summary = self.recompute_for(&contract, user_id, month, year).await?;
        match self.store.read_monthly_summary(key).await? {
            Some(stored) if stored == summary => Ok(stored),
            Some(_) => {
                debug!(key = %key, "Stored summary is stale, replacing");
                self.store.upsert_monthly_summary(summary).await
            }
            None => {
                debug!(key = %key, "No stored summary, storing recomputation");
                self.store.upsert_monthly_summary(summary).await
            }
        }
    }

    /// Builds the payroll report for a month.
    ///
    /// The unhealthy-environment bonus is added to the report only; the
    /// stored summary is left unchanged.
    pub async fn payroll_report(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        month: u32,
        year: i32,
        unhealthy_environment: bool,
    ) -> EngineResult<PayrollReport> {
        let summary = self
            .monthly_summary(user_id, contract_id, month, year)
            .await?;
        build_payroll_report(summary, unhealthy_environment, &self.rules)
    }

    async fn read_user_contract(&self, user_id: Uuid, contract_id: Uuid) -> EngineResult<Contract> {
        let contract = self.store.read_contract(contract_id).await?;
        if contract.user_id != user_id {
            warn!(
                contract_id = %contract_id,
                user_id = %user_id,
                "Contract belongs to another user"
            );
            return Err(EngineError::ContractNotFound { contract_id });
        }
        Ok(contract)
    }

    async fn recompute_for(
        &self,
        contract: &Contract,
        user_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<MonthlySummary> {
        let entries = self
            .store
            .read_entries_for_month(user_id, contract.id, month, year)
            .await?;
        recompute_monthly_summary(
            user_id,
            contract.id,
            month,
            year,
            &entries,
            contract,
            &self.rules,
        )
    }

    async fn refresh_for(
        &self,
        contract: &Contract,
        user_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<MonthlySummary> {
        let summary = self.recompute_for(contract, user_id, month, year).await?;
        let summary = self.store.upsert_monthly_summary(summary).await?;

        info!(
            user_id = %user_id,
            contract_id = %contract.id,
            month,
            year,
            days_worked = summary.days_worked,
            total_salary = %summary.total_salary,
            "Monthly summary refreshed"
        );
        Ok(summary)
    }

    async fn upsert_entry_with_retry(&self, entry: DailyEntry) -> EngineResult<DailyEntry> {
        let mut attempt = 1;
        loop {
            match self.store.upsert_entry(entry.clone()).await {
                Err(EngineError::Conflict { key }) if attempt < MAX_UPSERT_ATTEMPTS => {
                    warn!(key = %key, attempt, "Entry upsert conflicted, retrying as overwrite");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

fn summary_key(user_id: Uuid, contract_id: Uuid, month: u32, year: i32) -> SummaryKey {
    SummaryKey {
        user_id,
        contract_id,
        month,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContractType;
    use crate::store::InMemoryEntryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_contract(contract_type: ContractType, base: &str, overtime_rate: &str) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            contract_type,
            base_amount: dec(base),
            overtime_rate: dec(overtime_rate),
            night_rate: dec("1.25"),
            employer_name: None,
            start_date: None,
        }
    }

    fn new_entry(contract: &Contract, day: &str, regular: &str, overtime: &str) -> NewDailyEntry {
        NewDailyEntry {
            user_id: contract.user_id,
            contract_id: contract.id,
            date: date(day),
            hours: WorkedHours::new(dec(regular), dec(overtime), Decimal::ZERO, Decimal::ZERO),
            notes: None,
        }
    }

    async fn service_with(contract: &Contract) -> PayrollService<InMemoryEntryStore> {
        let service = PayrollService::new(
            Arc::new(InMemoryEntryStore::new()),
            PayrollRules::default(),
        );
        service.register_contract(contract.clone()).await.unwrap();
        service
    }

    /// A store that reports a conflict on the first `conflicts` entry upserts.
    struct ConflictingStore {
        inner: InMemoryEntryStore,
        conflicts: AtomicU32,
        attempts: AtomicU32,
    }

    impl ConflictingStore {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemoryEntryStore::new(),
                conflicts: AtomicU32::new(conflicts),
                attempts: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl EntryStore for ConflictingStore {
        async fn read_contract(&self, contract_id: Uuid) -> EngineResult<Contract> {
            self.inner.read_contract(contract_id).await
        }

        async fn upsert_contract(&self, contract: Contract) -> EngineResult<Contract> {
            self.inner.upsert_contract(contract).await
        }

        async fn read_entries_for_month(
            &self,
            user_id: Uuid,
            contract_id: Uuid,
            month: u32,
            year: i32,
        ) -> EngineResult<Vec<DailyEntry>> {
            self.inner
                .read_entries_for_month(user_id, contract_id, month, year)
                .await
        }

        async fn upsert_entry(&self, entry: DailyEntry) -> EngineResult<DailyEntry> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let remaining = self.conflicts.load(Ordering::SeqCst);
            if remaining > 0 {
                self.conflicts.store(remaining - 1, Ordering::SeqCst);
                return Err(EngineError::Conflict {
                    key: entry.key().to_string(),
                });
            }
            self.inner.upsert_entry(entry).await
        }

        async fn delete_entry(&self, key: EntryKey) -> EngineResult<Option<DailyEntry>> {
            self.inner.delete_entry(key).await
        }

        async fn upsert_monthly_summary(
            &self,
            summary: MonthlySummary,
        ) -> EngineResult<MonthlySummary> {
            self.inner.upsert_monthly_summary(summary).await
        }

        async fn read_monthly_summary(
            &self,
            key: SummaryKey,
        ) -> EngineResult<Option<MonthlySummary>> {
            self.inner.read_monthly_summary(key).await
        }
    }

    // ==========================================================================
    // Save path
    // ==========================================================================

    #[tokio::test]
    async fn test_save_entry_caches_rounded_wage_and_refreshes_summary() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let saved = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "2"))
            .await
            .unwrap();

        assert_eq!(saved.entry.daily_wage.to_string(), "110.00");
        assert_eq!(saved.summary.total_regular_hours, dec("8"));
        assert_eq!(saved.summary.total_salary, dec("110.00"));
        assert_eq!(saved.summary.days_worked, 1);

        let stored = service
            .store()
            .read_monthly_summary(saved.summary.key())
            .await
            .unwrap();
        assert_eq!(stored, Some(saved.summary));
    }

    #[tokio::test]
    async fn test_saving_same_day_twice_keeps_one_row_with_second_values() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let first = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "0"))
            .await
            .unwrap();
        let second = service
            .save_entry(new_entry(&contract, "2026-03-02", "6", "1"))
            .await
            .unwrap();

        assert_eq!(service.store().entry_count().await, 1);
        assert_eq!(second.entry.id, first.entry.id);
        assert_eq!(second.entry.hours.regular, dec("6"));
        assert_eq!(second.summary.total_regular_hours, dec("6"));
        assert_eq!(second.summary.total_salary, dec("75.00"));
    }

    #[tokio::test]
    async fn test_month_totals_accumulate_across_days() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        for (day, hours) in [("2026-03-02", "8"), ("2026-03-03", "6"), ("2026-03-04", "4")] {
            service
                .save_entry(new_entry(&contract, day, hours, "0"))
                .await
                .unwrap();
        }

        let summary = service
            .monthly_summary(contract.user_id, contract.id, 3, 2026)
            .await
            .unwrap();
        assert_eq!(summary.total_regular_hours, dec("18"));
        assert_eq!(summary.days_worked, 3);
    }

    #[tokio::test]
    async fn test_negative_hours_rejected_before_store() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let result = service
            .save_entry(new_entry(&contract, "2026-03-02", "-1", "0"))
            .await;

        assert!(matches!(result, Err(EngineError::InvalidHours { .. })));
        assert_eq!(service.store().entry_count().await, 0);
        assert_eq!(service.store().summary_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_contract_writes_nothing() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = PayrollService::new(
            Arc::new(InMemoryEntryStore::new()),
            PayrollRules::default(),
        );

        let result = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "0"))
            .await;

        assert!(matches!(result, Err(EngineError::ContractNotFound { .. })));
        assert_eq!(service.store().entry_count().await, 0);
        assert_eq!(service.store().summary_count().await, 0);
    }

    #[tokio::test]
    async fn test_contract_of_another_user_is_not_found() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let mut entry = new_entry(&contract, "2026-03-02", "8", "0");
        entry.user_id = Uuid::new_v4();

        let result = service.save_entry(entry).await;
        assert!(matches!(result, Err(EngineError::ContractNotFound { .. })));
        assert_eq!(service.store().entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_conflicts_retried_until_success() {
        let contract = create_contract(ContractType::Daily, "40", "1.2");
        let store = Arc::new(ConflictingStore::new(MAX_UPSERT_ATTEMPTS - 1));
        let service = PayrollService::new(Arc::clone(&store), PayrollRules::default());
        service.register_contract(contract.clone()).await.unwrap();

        let saved = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "4"))
            .await
            .unwrap();

        assert_eq!(saved.entry.daily_wage, dec("64.00"));
        assert_eq!(store.attempts.load(Ordering::SeqCst), MAX_UPSERT_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_conflict_surfaces_after_max_attempts() {
        let contract = create_contract(ContractType::Daily, "40", "1.2");
        let store = Arc::new(ConflictingStore::new(MAX_UPSERT_ATTEMPTS));
        let service = PayrollService::new(Arc::clone(&store), PayrollRules::default());
        service.register_contract(contract.clone()).await.unwrap();

        let result = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "0"))
            .await;

        match result {
            Err(err @ EngineError::Conflict { .. }) => assert!(err.is_retryable()),
            other => panic!("Expected Conflict, got {:?}", other),
        }
        assert_eq!(store.attempts.load(Ordering::SeqCst), MAX_UPSERT_ATTEMPTS);
        assert_eq!(store.inner.summary_count().await, 0);
    }

    // ==========================================================================
    // Delete, summaries and reports
    // ==========================================================================

    #[tokio::test]
    async fn test_delete_entry_refreshes_summary() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let saved = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "0"))
            .await
            .unwrap();
        service
            .save_entry(new_entry(&contract, "2026-03-03", "4", "0"))
            .await
            .unwrap();

        let summary = service.delete_entry(saved.entry.key()).await.unwrap();
        assert_eq!(summary.total_regular_hours, dec("4"));
        assert_eq!(summary.total_salary, dec("40.00"));
    }

    #[tokio::test]
    async fn test_delete_missing_entry_still_refreshes() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5");
        let service = service_with(&contract).await;

        let key = EntryKey {
            user_id: contract.user_id,
            contract_id: contract.id,
            date: date("2026-03-02"),
        };
        let summary = service.delete_entry(key).await.unwrap();

        assert_eq!(summary.total_salary, dec("880.00"));
        assert_eq!(service.store().summary_count().await, 1);
    }

    #[tokio::test]
    async fn test_monthly_summary_computed_when_missing() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5");
        let service = service_with(&contract).await;

        let summary = service
            .monthly_summary(contract.user_id, contract.id, 3, 2026)
            .await
            .unwrap();

        assert_eq!(summary.base_salary.to_string(), "880.00");
        assert_eq!(summary.total_salary.to_string(), "880.00");
    }

    #[tokio::test]
    async fn test_summary_follows_re_registered_contract_terms() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let saved = service
            .save_entry(new_entry(&contract, "2026-03-02", "8", "0"))
            .await
            .unwrap();
        assert_eq!(saved.summary.total_salary, dec("80.00"));

        let raised = Contract {
            base_amount: dec("20"),
            ..contract.clone()
        };
        service.register_contract(raised).await.unwrap();

        let summary = service
            .monthly_summary(contract.user_id, contract.id, 3, 2026)
            .await
            .unwrap();
        let recomputed = service
            .refresh_monthly_summary(contract.user_id, contract.id, 3, 2026)
            .await
            .unwrap();
        assert_eq!(summary.total_salary, dec("160.00"));
        assert_eq!(summary, recomputed);

        let stored = service
            .store()
            .read_monthly_summary(summary.key())
            .await
            .unwrap();
        assert_eq!(stored, Some(summary));

        let report = service
            .payroll_report(contract.user_id, contract.id, 3, 2026, false)
            .await
            .unwrap();
        assert_eq!(report.gross_total, dec("160.00"));
    }

    #[tokio::test]
    async fn test_summary_read_of_other_users_contract_is_not_found() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5");
        let service = service_with(&contract).await;

        let result = service
            .monthly_summary(Uuid::new_v4(), contract.id, 3, 2026)
            .await;
        assert!(matches!(result, Err(EngineError::ContractNotFound { .. })));
        assert_eq!(service.store().summary_count().await, 0);
    }

    #[tokio::test]
    async fn test_huge_hours_rejected_without_writing() {
        let contract = create_contract(ContractType::Hourly, "10", "1.5");
        let service = service_with(&contract).await;

        let mut entry = new_entry(&contract, "2026-03-02", "0", "0");
        entry.hours = WorkedHours::from_f64(1e28, 0.0, 0.0, 0.0).unwrap();

        let result = service.save_entry(entry).await;
        assert!(matches!(result, Err(EngineError::AmountOverflow { .. })));
        assert_eq!(service.store().entry_count().await, 0);
        assert_eq!(service.store().summary_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5");
        let service = service_with(&contract).await;

        let result = service
            .refresh_monthly_summary(contract.user_id, contract.id, 13, 2026)
            .await;
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[tokio::test]
    async fn test_payroll_report_adds_bonus_without_touching_summary() {
        let contract = create_contract(ContractType::Monthly, "880", "1.5");
        let service = service_with(&contract).await;

        let report = service
            .payroll_report(contract.user_id, contract.id, 3, 2026, true)
            .await
            .unwrap();

        assert_eq!(report.unhealthy_bonus, dec("88.00"));
        assert_eq!(report.gross_total, dec("968.00"));

        let stored = service
            .monthly_summary(contract.user_id, contract.id, 3, 2026)
            .await
            .unwrap();
        assert_eq!(stored.total_salary, dec("880.00"));
    }

    #[tokio::test]
    async fn test_preview_does_not_write() {
        let contract = create_contract(ContractType::Daily, "40", "1.2");
        let service = service_with(&contract).await;

        let hours = WorkedHours::new(dec("8"), dec("4"), Decimal::ZERO, Decimal::ZERO);
        let result = service.preview_wage(contract.id, &hours).await.unwrap();

        assert_eq!(round_to_cents(result.wage), dec("64.00"));
        assert_eq!(service.store().entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_invalid_contract_rejected() {
        let contract = create_contract(ContractType::Hourly, "10", "0.5");
        let service = PayrollService::new(
            Arc::new(InMemoryEntryStore::new()),
            PayrollRules::default(),
        );

        let result = service.register_contract(contract).await;
        assert!(matches!(result, Err(EngineError::InvalidContract { .. })));
    }
}
