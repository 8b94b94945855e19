pub mod json_backend;
pub mod memory;

use crate::domain::{Contract, Owner, PaymentEntry, Property, Tenant};
use crate::errors::Result;

/// Whole-collection persistence for user-entered payments.
///
/// `load` returns the full collection; `save_all` replaces it in one step.
/// There is no partial update and no locking: the last writer wins.
pub trait PaymentRepository: Send + Sync {
    fn load(&self) -> Result<Vec<PaymentEntry>>;
    fn save_all(&self, records: &[PaymentEntry]) -> Result<()>;
}

/// Read-only access to the collections owned by the rest of the application.
pub trait RecordSource: Send + Sync {
    fn contracts(&self) -> Result<Vec<Contract>>;
    fn tenants(&self) -> Result<Vec<Tenant>>;
    fn properties(&self) -> Result<Vec<Property>>;
    fn owners(&self) -> Result<Vec<Owner>>;
}

/// Named collections kept by the application store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Payments,
    Contracts,
    Tenants,
    Properties,
    Owners,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Payments => "payments",
            Collection::Contracts => "contracts",
            Collection::Tenants => "tenants",
            Collection::Properties => "properties",
            Collection::Owners => "owners",
        }
    }
}

pub use json_backend::JsonStore;
pub use memory::InMemoryStore;
