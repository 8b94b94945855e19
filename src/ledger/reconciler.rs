//! Merges recorded payments with generated obligations into one ledger.

use std::collections::{btree_map::Entry, BTreeMap};

use tracing::{debug, warn};

use crate::domain::{LedgerKey, MonthKey, PaymentEntry};

/// Stored records whose ledger slot belongs to `month`.
pub fn stored_for_month(stored: &[PaymentEntry], month: MonthKey) -> Vec<PaymentEntry> {
    stored
        .iter()
        .filter(|entry| entry.month_key == month)
        .cloned()
        .collect()
}

/// Merges `stored` records with `generated` obligations.
///
/// At most one entry survives per [`LedgerKey`]. A stored record always
/// suppresses the generated obligation for its slot; if the store itself
/// holds two records for one slot, the later one in collection order wins.
/// The output is ordered by payment date, stored before generated, then by
/// contract and id, so identical inputs always render identically.
pub fn reconcile(stored: &[PaymentEntry], generated: &[PaymentEntry]) -> Vec<PaymentEntry> {
    let mut slots: BTreeMap<LedgerKey, PaymentEntry> = BTreeMap::new();

    for record in stored {
        if let Some(previous) = slots.insert(record.key(), record.clone()) {
            warn!(
                key = %record.key(),
                dropped = %previous.id,
                kept = %record.id,
                "multiple stored payments share one ledger slot"
            );
        }
    }

    let mut suppressed = 0usize;
    for obligation in generated {
        match slots.entry(obligation.key()) {
            Entry::Vacant(slot) => {
                slot.insert(obligation.clone());
            }
            Entry::Occupied(_) => suppressed += 1,
        }
    }

    let mut ledger: Vec<PaymentEntry> = slots.into_values().collect();
    ledger.sort_by(|a, b| {
        a.payment_date
            .cmp(&b.payment_date)
            .then_with(|| a.generated.cmp(&b.generated))
            .then_with(|| a.contract_id.cmp(&b.contract_id))
            .then_with(|| a.id.cmp(&b.id))
    });
    debug!(
        stored = stored.len(),
        generated = generated.len(),
        suppressed,
        entries = ledger.len(),
        "reconciled ledger"
    );
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contract, PaymentMethod, PaymentStatus};
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn month() -> MonthKey {
        "2025-10".parse().unwrap()
    }

    fn lease(start_day: u32) -> Contract {
        Contract::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            1000.0,
            NaiveDate::from_ymd_opt(2025, 1, start_day).unwrap(),
        )
    }

    fn paid(contract: &Contract, day: u32) -> PaymentEntry {
        PaymentEntry::stored(
            contract.id,
            date(day),
            contract.monthly_rent,
            PaymentStatus::Paid,
            PaymentMethod::Cash,
        )
    }

    fn obligation(contract: &Contract, day: u32) -> PaymentEntry {
        PaymentEntry::obligation(contract, month(), date(day), PaymentStatus::Pending)
    }

    #[test]
    fn stored_record_suppresses_generated_for_same_slot() {
        let a = lease(5);
        let b = lease(9);
        let stored = vec![paid(&a, 6)];
        let generated = vec![obligation(&a, 5), obligation(&b, 9)];

        let ledger = reconcile(&stored, &generated);
        assert_eq!(ledger.len(), 2);
        let for_a: Vec<_> = ledger.iter().filter(|e| e.contract_id == a.id).collect();
        assert_eq!(for_a.len(), 1);
        assert!(!for_a[0].generated);
        assert!(ledger.iter().any(|e| e.contract_id == b.id && e.generated));
    }

    #[test]
    fn output_has_one_entry_per_slot() {
        let a = lease(5);
        let stored = vec![paid(&a, 2), paid(&a, 3)];
        let ledger = reconcile(&stored, &[obligation(&a, 5)]);

        let keys: HashSet<_> = ledger.iter().map(PaymentEntry::key).collect();
        assert_eq!(keys.len(), ledger.len());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, stored[1].id);
    }

    #[test]
    fn ordering_is_independent_of_input_order() {
        let a = lease(5);
        let b = lease(5);
        let c = lease(20);
        let stored = vec![paid(&c, 1)];
        let forward = reconcile(&stored, &[obligation(&a, 5), obligation(&b, 5)]);
        let backward = reconcile(&stored, &[obligation(&b, 5), obligation(&a, 5)]);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].contract_id, c.id);
    }

    #[test]
    fn filters_stored_records_by_slot_month() {
        let a = lease(5);
        let mut november = paid(&a, 5);
        november.month_key = "2025-11".parse().unwrap();
        let october = paid(&a, 6);
        let filtered = stored_for_month(&[november, october.clone()], month());
        assert_eq!(filtered, vec![october]);
    }
}
