use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Contract, MonthKey, PaymentEntry, PaymentForm};
use crate::errors::Result;
use crate::ledger::{
    self, CalendarMonth, Clock, Directory, LedgerEditor, MonthSummary, ResolvedEntry,
};
use crate::storage::{PaymentRepository, RecordSource};

/// Facade that ties the payment store, the contract source, and the clock
/// to the ledger engine.
///
/// Every read recomputes from the stores; every mutation loads the full
/// payment collection, applies one edit, and writes the collection back.
/// Reads treat an unreadable payment collection as empty. Mutations refuse
/// to run against it, so the unreadable file is never replaced.
pub struct RentLedgerManager {
    payments: Box<dyn PaymentRepository>,
    records: Box<dyn RecordSource>,
    clock: Box<dyn Clock>,
}

impl RentLedgerManager {
    pub fn new(
        payments: Box<dyn PaymentRepository>,
        records: Box<dyn RecordSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            payments,
            records,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn contracts(&self) -> Result<Vec<Contract>> {
        self.records.contracts()
    }

    /// The persisted payments, failing if the collection cannot be read.
    pub fn stored_payments(&self) -> Result<Vec<PaymentEntry>> {
        self.payments.load()
    }

    /// Rent obligations implied by the active contracts for `month`.
    pub fn generate_for_month(&self, month: MonthKey) -> Result<Vec<PaymentEntry>> {
        let contracts = self.records.contracts()?;
        Ok(ledger::generate(&contracts, month, self.today()))
    }

    /// The reconciled ledger for `month`: stored records plus the
    /// obligations no stored record accounts for.
    pub fn reconcile(&self, month: MonthKey) -> Result<Vec<PaymentEntry>> {
        let generated = self.generate_for_month(month)?;
        let stored = ledger::stored_for_month(&self.stored_or_empty(), month);
        Ok(ledger::reconcile(&stored, &generated))
    }

    /// Creates a payment, or applies an edit to `existing` when given.
    pub fn upsert_payment(
        &self,
        form: &PaymentForm,
        existing: Option<&PaymentEntry>,
    ) -> Result<PaymentEntry> {
        let mut records = self.payments.load()?;
        let record = match existing {
            Some(entry) => LedgerEditor::update(&mut records, entry, form)?,
            None => LedgerEditor::create(&mut records, form)?,
        };
        self.persist(records)?;
        Ok(record)
    }

    /// Deletes a stored payment. If its contract is still active the slot
    /// shows a generated obligation again on the next reconciliation.
    pub fn delete_payment(&self, id: Uuid) -> Result<PaymentEntry> {
        let mut records = self.payments.load()?;
        let removed = LedgerEditor::delete(&mut records, id)?;
        self.persist(records)?;
        Ok(removed)
    }

    /// Looks up an entry of the reconciled `month` ledger by id.
    pub fn find_entry(&self, month: MonthKey, id: Uuid) -> Result<Option<PaymentEntry>> {
        Ok(self.reconcile(month)?.into_iter().find(|entry| entry.id == id))
    }

    pub fn directory(&self) -> Result<Directory> {
        Ok(Directory::new(
            self.records.contracts()?,
            self.records.tenants()?,
            self.records.properties()?,
            self.records.owners()?,
        ))
    }

    /// Reconciled entries with display names, orphans removed.
    pub fn resolved(&self, month: MonthKey) -> Result<Vec<ResolvedEntry>> {
        let directory = self.directory()?;
        Ok(directory.resolve_all(&self.reconcile(month)?))
    }

    pub fn calendar(&self, month: MonthKey) -> Result<CalendarMonth> {
        Ok(CalendarMonth::project(month, &self.visible(month)?, self.today()))
    }

    /// Figures for the entries `calendar` displays.
    pub fn summary(&self, month: MonthKey) -> Result<MonthSummary> {
        let contracts = self.records.contracts()?;
        Ok(MonthSummary::from_ledger(month, &self.visible(month)?, &contracts))
    }

    /// Unpaid amounts recorded across every month.
    pub fn outstanding_total(&self) -> f64 {
        ledger::outstanding_total(&self.stored_or_empty())
    }

    /// Reconciled entries whose contract still exists.
    fn visible(&self, month: MonthKey) -> Result<Vec<PaymentEntry>> {
        let directory = self.directory()?;
        let reconciled = self.reconcile(month)?;
        let total = reconciled.len();
        let visible: Vec<PaymentEntry> = reconciled
            .into_iter()
            .filter(|entry| directory.contract(entry.contract_id).is_some())
            .collect();
        if visible.len() != total {
            debug!(month = %month, orphans = total - visible.len(), "orphan entries hidden");
        }
        Ok(visible)
    }

    fn stored_or_empty(&self) -> Vec<PaymentEntry> {
        match self.payments.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "payments unavailable, continuing with an empty collection");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: Vec<PaymentEntry>) -> Result<()> {
        let records = LedgerEditor::strip_generated(records);
        debug!(records = records.len(), "persisting payments");
        self.payments.save_all(&records)
    }
}
