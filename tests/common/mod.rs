#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rent_ledger::{
    core::RentLedgerManager,
    domain::{Contract, MonthKey, Owner, Property, Tenant},
    ledger::FixedClock,
    storage::{Collection, InMemoryStore, JsonStore},
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn month(raw: &str) -> MonthKey {
    raw.parse().expect("valid month key")
}

/// A fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn lease(start: NaiveDate, rent: f64) -> Contract {
    Contract::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), rent, start)
}

/// A lease together with its tenant, property and owner records.
pub fn named_lease(
    tenant: &str,
    property: &str,
    start: NaiveDate,
    rent: f64,
) -> (Contract, Tenant, Property, Owner) {
    let tenant = Tenant::new(tenant);
    let property = Property::new(property);
    let owner = Owner::new("Owner");
    let contract = Contract::new(property.id, tenant.id, owner.id, rent, start);
    (contract, tenant, property, owner)
}

pub fn memory_manager(store: &InMemoryStore, today: NaiveDate) -> RentLedgerManager {
    RentLedgerManager::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(FixedClock(today)),
    )
}

/// Creates a JSON store in an isolated directory seeded with `contracts`.
pub fn json_store_with(contracts: &[Contract]) -> JsonStore {
    let store = JsonStore::new(temp_home().join("data"), Some(3)).expect("create json store");
    store
        .write_collection(Collection::Contracts, contracts)
        .expect("seed contracts");
    store
}

pub fn json_manager(store: &JsonStore, today: NaiveDate) -> RentLedgerManager {
    RentLedgerManager::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(FixedClock(today)),
    )
}
