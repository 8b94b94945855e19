mod common;

use common::{date, lease, memory_manager, month};
use rent_ledger::{
    domain::{LedgerKey, PaymentForm, PaymentStatus},
    ledger,
    storage::InMemoryStore,
};

#[test]
fn rent_lifecycle_unpaid_then_paid_then_deleted() {
    let contract = lease(date(2025, 1, 15), 100000.0);
    let store = InMemoryStore::with_contracts(vec![contract.clone()]);
    let manager = memory_manager(&store, date(2025, 10, 20));
    let october = month("2025-10");

    // No record yet: one overdue obligation.
    let ledger = manager.reconcile(october).unwrap();
    assert_eq!(ledger.len(), 1);
    let obligation = &ledger[0];
    assert_eq!(obligation.contract_id, contract.id);
    assert_eq!(obligation.month_key, october);
    assert_eq!(obligation.amount, 100000.0);
    assert_eq!(obligation.status, PaymentStatus::Unpaid);
    assert!(obligation.generated);

    // Recording the payment replaces the obligation.
    let form = PaymentForm {
        payment_date: Some(date(2025, 10, 16)),
        ..PaymentForm::for_contract(&contract)
    };
    let saved = manager.upsert_payment(&form, None).unwrap();
    let ledger = manager.reconcile(october).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0], saved);
    assert_eq!(ledger[0].status, PaymentStatus::Paid);
    assert!(!ledger[0].generated);

    // Deleting it brings the obligation back.
    manager.delete_payment(saved.id).unwrap();
    let ledger = manager.reconcile(october).unwrap();
    assert_eq!(ledger.len(), 1);
    assert!(ledger[0].generated);
    assert_eq!(ledger[0].status, PaymentStatus::Unpaid);
    assert_eq!(ledger[0].id, LedgerKey::new(contract.id, october).generated_id());
}

#[test]
fn regenerated_status_follows_the_clock() {
    let contract = lease(date(2025, 1, 15), 500.0);
    let store = InMemoryStore::with_contracts(vec![contract]);
    let october = month("2025-10");

    let before_due = memory_manager(&store, date(2025, 10, 15));
    assert_eq!(before_due.reconcile(october).unwrap()[0].status, PaymentStatus::Pending);

    let after_due = memory_manager(&store, date(2025, 10, 16));
    assert_eq!(after_due.reconcile(october).unwrap()[0].status, PaymentStatus::Unpaid);

    let month_before = memory_manager(&store, date(2025, 9, 1));
    assert_eq!(month_before.reconcile(october).unwrap()[0].status, PaymentStatus::Pending);
}

#[test]
fn day_31_lease_clamps_inside_short_months() {
    let contract = lease(date(2025, 1, 31), 750.0);
    assert_eq!(ledger::due_date(&contract, month("2025-09")), date(2025, 9, 30));
    assert_eq!(ledger::due_date(&contract, month("2025-02")), date(2025, 2, 28));
    assert_eq!(ledger::due_date(&contract, month("2024-02")), date(2024, 2, 29));

    let store = InMemoryStore::with_contracts(vec![contract]);
    let manager = memory_manager(&store, date(2025, 9, 30));
    let ledger = manager.reconcile(month("2025-09")).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].payment_date, date(2025, 9, 30));
    assert_eq!(ledger[0].month_key, month("2025-09"));
    assert_eq!(ledger[0].status, PaymentStatus::Pending);
}

#[test]
fn editing_a_generated_entry_records_it() {
    let contract = lease(date(2025, 3, 5), 300.0);
    let store = InMemoryStore::with_contracts(vec![contract]);
    let manager = memory_manager(&store, date(2025, 10, 20));
    let october = month("2025-10");

    let obligation = manager.reconcile(october).unwrap().remove(0);
    let mut form = PaymentForm::from_entry(&obligation);
    form.status = PaymentStatus::Paid;
    form.amount = Some(250.0);
    let saved = manager.upsert_payment(&form, Some(&obligation)).unwrap();

    assert!(!saved.generated);
    assert_ne!(saved.id, obligation.id);
    let persisted = store.persisted().unwrap();
    assert_eq!(persisted, vec![saved.clone()]);

    let ledger = manager.reconcile(october).unwrap();
    assert_eq!(ledger, vec![saved]);
}

#[test]
fn other_months_are_untouched_by_a_recorded_payment() {
    let contract = lease(date(2025, 1, 10), 400.0);
    let store = InMemoryStore::with_contracts(vec![contract.clone()]);
    let manager = memory_manager(&store, date(2025, 11, 20));

    let form = PaymentForm {
        payment_date: Some(date(2025, 10, 10)),
        ..PaymentForm::for_contract(&contract)
    };
    manager.upsert_payment(&form, None).unwrap();

    let november = manager.reconcile(month("2025-11")).unwrap();
    assert_eq!(november.len(), 1);
    assert!(november[0].generated);
    assert_eq!(november[0].status, PaymentStatus::Unpaid);
}

#[test]
fn summary_counts_the_reconciled_month() {
    let paid = lease(date(2025, 1, 1), 1000.0);
    let overdue = lease(date(2025, 1, 5), 200.0);
    let upcoming = lease(date(2025, 1, 25), 300.0);
    let store = InMemoryStore::with_contracts(vec![paid.clone(), overdue, upcoming]);
    let manager = memory_manager(&store, date(2025, 10, 20));
    let october = month("2025-10");

    let form = PaymentForm {
        payment_date: Some(date(2025, 10, 2)),
        ..PaymentForm::for_contract(&paid)
    };
    manager.upsert_payment(&form, None).unwrap();

    let summary = manager.summary(october).unwrap();
    assert_eq!(summary.collected.count, 1);
    assert_eq!(summary.collected.amount, 1000.0);
    assert_eq!(summary.unpaid.amount, 200.0);
    assert_eq!(summary.pending.amount, 300.0);
    assert_eq!(summary.active_contracts, 3);
    // Generated obligations never count as recorded arrears.
    assert_eq!(manager.outstanding_total(), 0.0);
}

#[test]
fn deleting_after_the_lease_ended_leaves_the_slot_empty() {
    let mut contract = lease(date(2025, 1, 15), 600.0);
    let store = InMemoryStore::with_contracts(vec![contract.clone()]);
    let manager = memory_manager(&store, date(2025, 10, 20));
    let october = month("2025-10");

    let form = PaymentForm {
        payment_date: Some(date(2025, 10, 15)),
        ..PaymentForm::for_contract(&contract)
    };
    let saved = manager.upsert_payment(&form, None).unwrap();
    assert_eq!(manager.reconcile(october).unwrap(), vec![saved.clone()]);

    // The lease ends before the stored payment is removed.
    contract.end(date(2025, 9, 30));
    store.set_contracts(vec![contract]).unwrap();
    assert_eq!(manager.reconcile(october).unwrap(), vec![saved.clone()]);

    manager.delete_payment(saved.id).unwrap();
    assert!(manager.reconcile(october).unwrap().is_empty());
}
