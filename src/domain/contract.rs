//! Lease contracts and the directory records they point at.
//!
//! These collections are owned by the surrounding application; the rent
//! ledger only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{Displayable, Identifiable},
    month::MonthKey,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub owner_id: Uuid,
    pub monthly_rent: f64,
    pub status: ContractStatus,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Contract {
    pub fn new(
        property_id: Uuid,
        tenant_id: Uuid,
        owner_id: Uuid,
        monthly_rent: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            tenant_id,
            owner_id,
            monthly_rent,
            status: ContractStatus::Active,
            start_date,
            end_date: None,
            deposit: None,
            notes: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }

    /// Whether the lease runs during any part of `month`.
    pub fn covers(&self, month: MonthKey) -> bool {
        if self.start_date > month.last_day() {
            return false;
        }
        match self.end_date {
            Some(end) => end >= month.first_day(),
            None => true,
        }
    }

    pub fn end(&mut self, end_date: NaiveDate) {
        self.status = ContractStatus::Ended;
        self.end_date = Some(end_date);
    }
}

impl Identifiable for Contract {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Contract {
    fn display_label(&self) -> String {
        format!("contract:{} [{:?}]", self.id, self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub full_name: String,
}

impl Tenant {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
        }
    }

    /// First word of the full name, used for compact calendar labels.
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
}

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Identifiable for Tenant {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for Property {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for Owner {
    fn id(&self) -> Uuid {
        self.id
    }
}
