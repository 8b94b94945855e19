//! In-memory store for tests and embedding without a filesystem.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    domain::{Contract, Owner, PaymentEntry, Property, Tenant},
    errors::{LedgerError, Result},
};

use super::{PaymentRepository, RecordSource};

#[derive(Debug, Default)]
struct MemoryState {
    payments: Vec<PaymentEntry>,
    contracts: Vec<Contract>,
    tenants: Vec<Tenant>,
    properties: Vec<Property>,
    owners: Vec<Owner>,
    corrupt_payments: bool,
    saves: usize,
}

/// Shared in-memory collections; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contracts(contracts: Vec<Contract>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state.contracts = contracts;
        }
        store
    }

    pub fn set_contracts(&self, contracts: Vec<Contract>) -> Result<()> {
        self.lock()?.contracts = contracts;
        Ok(())
    }

    pub fn set_directory(
        &self,
        tenants: Vec<Tenant>,
        properties: Vec<Property>,
        owners: Vec<Owner>,
    ) -> Result<()> {
        let mut state = self.lock()?;
        state.tenants = tenants;
        state.properties = properties;
        state.owners = owners;
        Ok(())
    }

    /// Makes subsequent payment loads fail as if the collection were malformed.
    pub fn corrupt_payments(&self) -> Result<()> {
        self.lock()?.corrupt_payments = true;
        Ok(())
    }

    /// Raw persisted payments, bypassing the corruption flag.
    pub fn persisted(&self) -> Result<Vec<PaymentEntry>> {
        Ok(self.lock()?.payments.clone())
    }

    pub fn save_count(&self) -> Result<usize> {
        Ok(self.lock()?.saves)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| LedgerError::StorageRead("in-memory store lock poisoned".into()))
    }
}

impl PaymentRepository for InMemoryStore {
    fn load(&self) -> Result<Vec<PaymentEntry>> {
        let state = self.lock()?;
        if state.corrupt_payments {
            return Err(LedgerError::StorageRead(
                "payments collection is malformed".into(),
            ));
        }
        Ok(state.payments.clone())
    }

    fn save_all(&self, records: &[PaymentEntry]) -> Result<()> {
        let mut state = self.lock()?;
        state.payments = records.to_vec();
        state.corrupt_payments = false;
        state.saves += 1;
        Ok(())
    }
}

impl RecordSource for InMemoryStore {
    fn contracts(&self) -> Result<Vec<Contract>> {
        Ok(self.lock()?.contracts.clone())
    }

    fn tenants(&self) -> Result<Vec<Tenant>> {
        Ok(self.lock()?.tenants.clone())
    }

    fn properties(&self) -> Result<Vec<Property>> {
        Ok(self.lock()?.properties.clone())
    }

    fn owners(&self) -> Result<Vec<Owner>> {
        Ok(self.lock()?.owners.clone())
    }
}
