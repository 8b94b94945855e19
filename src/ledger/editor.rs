//! Applies user create/update/delete intents to the stored payment collection.
//!
//! Every operation works on the full collection held by the caller and
//! leaves it untouched when it fails, so the caller can persist the result
//! as a single whole-collection replacement.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Displayable, LedgerKey, PaymentEntry, PaymentForm, ValidatedPayment};
use crate::errors::{LedgerError, Result};

pub struct LedgerEditor;

impl LedgerEditor {
    /// Records a new payment and returns it.
    ///
    /// The ledger slot is derived from the payment date. A stored record
    /// already occupying that slot is replaced and removed from the
    /// collection, so the collection keeps one record per contract and month.
    pub fn create(records: &mut Vec<PaymentEntry>, form: &PaymentForm) -> Result<PaymentEntry> {
        let payment = form.validate()?;
        let record = PaymentEntry::stored(
            payment.contract_id,
            payment.payment_date,
            payment.amount,
            payment.status,
            payment.method,
        );
        Self::occupy_slot(records, record.key());
        records.push(record.clone());
        info!(payment = %record.display_label(), "payment recorded");
        Ok(record)
    }

    /// Applies `form` to `existing`.
    ///
    /// Editing a generated obligation converts it into a stored record with
    /// a fresh id in the same slot. Editing a stored record replaces it in
    /// place under its own id. The slot never moves: the contract cannot be
    /// changed and the month stays the one the entry was filed under.
    pub fn update(
        records: &mut Vec<PaymentEntry>,
        existing: &PaymentEntry,
        form: &PaymentForm,
    ) -> Result<PaymentEntry> {
        let payment = form.validate()?;
        if payment.contract_id != existing.contract_id {
            return Err(LedgerError::Validation(
                "the contract of an existing payment cannot be changed".into(),
            ));
        }

        if existing.generated {
            let record = Self::materialize(existing, &payment, Uuid::new_v4());
            Self::occupy_slot(records, record.key());
            records.push(record.clone());
            info!(
                payment = %record.display_label(),
                "generated obligation converted to stored payment"
            );
            return Ok(record);
        }

        let position = records
            .iter()
            .position(|record| record.id == existing.id && !record.generated)
            .ok_or(LedgerError::NotFound(existing.id))?;
        let record = Self::materialize(existing, &payment, existing.id);
        records[position] = record.clone();
        info!(payment = %record.display_label(), "payment updated");
        Ok(record)
    }

    /// Removes the stored record identified by `id`.
    ///
    /// Generated ids never live in the collection, so they fail with
    /// [`LedgerError::NotFound`] like any unknown id.
    pub fn delete(records: &mut Vec<PaymentEntry>, id: Uuid) -> Result<PaymentEntry> {
        let position = records
            .iter()
            .position(|record| record.id == id && !record.generated)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = records.remove(position);
        info!(payment = %removed.display_label(), "payment deleted");
        Ok(removed)
    }

    /// Drops every generated entry so only user-entered records are persisted.
    pub fn strip_generated(records: Vec<PaymentEntry>) -> Vec<PaymentEntry> {
        let before = records.len();
        let kept: Vec<PaymentEntry> = records.into_iter().filter(|r| !r.generated).collect();
        let stripped = before - kept.len();
        if stripped > 0 {
            warn!(stripped, "generated entries removed before persisting");
        }
        kept
    }

    fn occupy_slot(records: &mut Vec<PaymentEntry>, key: LedgerKey) {
        let mut replaced = Vec::new();
        records.retain(|record| {
            if record.key() == key {
                replaced.push(record.display_label());
                false
            } else {
                true
            }
        });
        if !replaced.is_empty() {
            warn!(key = %key, replaced = ?replaced, "stored payments replaced in ledger slot");
        }
    }

    fn materialize(existing: &PaymentEntry, payment: &ValidatedPayment, id: Uuid) -> PaymentEntry {
        PaymentEntry {
            id,
            contract_id: existing.contract_id,
            payment_date: payment.payment_date,
            amount: payment.amount,
            status: payment.status,
            method: Some(payment.method),
            month_key: existing.month_key,
            generated: false,
        }
    }
}
