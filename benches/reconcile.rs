use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rent_ledger::domain::{Contract, MonthKey, PaymentEntry, PaymentMethod, PaymentStatus};
use rent_ledger::ledger::{self, LedgerEditor};
use rent_ledger::storage::{JsonStore, PaymentRepository};
use tempfile::tempdir;
use uuid::Uuid;

fn build_contracts(count: usize) -> Vec<Contract> {
    let first_start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            Contract::new(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
                50_000.0 + (idx % 100) as f64 * 1_000.0,
                first_start + Duration::days((idx % 365) as i64),
            )
        })
        .collect()
}

/// Roughly one stored payment for every other contract and month of 2025.
fn build_payments(contracts: &[Contract]) -> Vec<PaymentEntry> {
    let mut payments = Vec::new();
    for month in 1..=12 {
        let key = MonthKey::new(2025, month).unwrap();
        for contract in contracts.iter().step_by(2) {
            payments.push(PaymentEntry::stored(
                contract.id,
                ledger::due_date(contract, key),
                contract.monthly_rent,
                PaymentStatus::Paid,
                PaymentMethod::BankTransfer,
            ));
        }
    }
    payments
}

fn bench_reconcile(c: &mut Criterion) {
    let contracts = build_contracts(black_box(2_000));
    let payments = build_payments(&contracts);
    let month = MonthKey::new(2025, 6).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("generate_2k_contracts", |b| {
        b.iter(|| black_box(ledger::generate(&contracts, month, today)))
    });

    c.bench_function("reconcile_month_12k_payments", |b| {
        b.iter(|| {
            let stored = ledger::stored_for_month(&payments, month);
            let generated = ledger::generate(&contracts, month, today);
            black_box(ledger::reconcile(&stored, &generated));
        })
    });

    c.bench_function("editor_delete_and_strip", |b| {
        b.iter_batched(
            || payments.clone(),
            |mut records| {
                let id = records[records.len() / 2].id;
                LedgerEditor::delete(&mut records, id).expect("delete");
                black_box(LedgerEditor::strip_generated(records));
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_store_io(c: &mut Criterion) {
    let contracts = build_contracts(black_box(2_000));
    let payments = build_payments(&contracts);
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().to_path_buf(), Some(1)).expect("json store");

    c.bench_function("payments_save_12k", |b| {
        b.iter(|| store.save_all(&payments).expect("save payments"))
    });

    c.bench_function("payments_load_12k", |b| {
        b.iter(|| black_box(store.load().expect("load payments")))
    });
}

criterion_group!(benches, bench_reconcile, bench_store_io);
criterion_main!(benches);
