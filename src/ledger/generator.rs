//! Synthesizes the rent obligations implied by active contracts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{Contract, Displayable, LedgerKey, MonthKey, PaymentEntry};
use crate::ledger::classifier::classify;

/// Due date of `contract`'s rent in `month`.
///
/// The lease's start day-of-month is carried into the target month and
/// clamped to its last day, so a lease starting on the 31st falls due on
/// the 30th in April and never rolls into May.
pub fn due_date(contract: &Contract, month: MonthKey) -> NaiveDate {
    month.day_clamped(contract.start_date.day())
}

/// Whether `contract` owes rent for `month`.
pub fn is_billable(contract: &Contract, month: MonthKey) -> bool {
    contract.is_active() && contract.covers(month)
}

/// Builds one generated obligation per billable contract for `month`.
///
/// Pure in `(contracts, month, today)`: identical inputs always yield the
/// same entries with the same ids, ordered by due date then contract id.
/// A contract listed twice still yields a single obligation.
pub fn generate(contracts: &[Contract], month: MonthKey, today: NaiveDate) -> Vec<PaymentEntry> {
    let mut slots: BTreeMap<LedgerKey, PaymentEntry> = BTreeMap::new();
    for contract in contracts {
        if !is_billable(contract, month) {
            debug!(contract = %contract.display_label(), month = %month, "no rent owed");
            continue;
        }
        let due = due_date(contract, month);
        let entry = PaymentEntry::obligation(contract, month, due, classify(due, today));
        slots.entry(entry.key()).or_insert(entry);
    }

    let mut obligations: Vec<PaymentEntry> = slots.into_values().collect();
    obligations.sort_by(|a, b| {
        a.payment_date
            .cmp(&b.payment_date)
            .then_with(|| a.contract_id.cmp(&b.contract_id))
    });
    debug!(
        month = %month,
        contracts = contracts.len(),
        generated = obligations.len(),
        "generated rent obligations"
    );
    obligations
}
