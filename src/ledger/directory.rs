//! Id lookups against the externally owned collections, for display.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{Contract, Identifiable, Owner, PaymentEntry, Property, Tenant};

/// Placeholder shown when a referenced record cannot be found.
pub const UNKNOWN_NAME: &str = "N/A";

/// A ledger entry together with the names it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub entry: PaymentEntry,
    pub tenant: String,
    pub tenant_short: String,
    pub property: String,
    pub owner: String,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    contracts: HashMap<Uuid, Contract>,
    tenants: HashMap<Uuid, Tenant>,
    properties: HashMap<Uuid, Property>,
    owners: HashMap<Uuid, Owner>,
}

impl Directory {
    pub fn new(
        contracts: Vec<Contract>,
        tenants: Vec<Tenant>,
        properties: Vec<Property>,
        owners: Vec<Owner>,
    ) -> Self {
        Self {
            contracts: index_by_id(contracts),
            tenants: index_by_id(tenants),
            properties: index_by_id(properties),
            owners: index_by_id(owners),
        }
    }

    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.get(&id)
    }

    pub fn tenant_name(&self, id: Uuid) -> &str {
        self.tenants
            .get(&id)
            .map(|tenant| tenant.full_name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn property_name(&self, id: Uuid) -> &str {
        self.properties
            .get(&id)
            .map(|property| property.name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn owner_name(&self, id: Uuid) -> &str {
        self.owners
            .get(&id)
            .map(|owner| owner.name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// `"<property> - <tenant>"`, as offered when picking a contract.
    pub fn contract_label(&self, contract: &Contract) -> String {
        format!(
            "{} - {}",
            self.property_name(contract.property_id),
            self.tenant_name(contract.tenant_id)
        )
    }

    /// Resolves display names, or `None` when the entry's contract is gone.
    pub fn resolve(&self, entry: &PaymentEntry) -> Option<ResolvedEntry> {
        let contract = self.contract(entry.contract_id)?;
        let tenant_short = self
            .tenants
            .get(&contract.tenant_id)
            .map(|tenant| tenant.first_name().to_string())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        Some(ResolvedEntry {
            entry: entry.clone(),
            tenant: self.tenant_name(contract.tenant_id).to_string(),
            tenant_short,
            property: self.property_name(contract.property_id).to_string(),
            owner: self.owner_name(contract.owner_id).to_string(),
        })
    }

    /// Resolves every entry, dropping orphans whose contract is unknown.
    pub fn resolve_all(&self, entries: &[PaymentEntry]) -> Vec<ResolvedEntry> {
        entries
            .iter()
            .filter_map(|entry| {
                let resolved = self.resolve(entry);
                if resolved.is_none() {
                    debug!(id = %entry.id, contract = %entry.contract_id, "orphan payment hidden");
                }
                resolved
            })
            .collect()
    }
}

fn index_by_id<T: Identifiable>(records: Vec<T>) -> HashMap<Uuid, T> {
    records.into_iter().map(|record| (record.id(), record)).collect()
}
