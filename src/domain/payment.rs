//! Rent payment entries, both user-recorded and synthesized from contracts.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        common::{Displayable, Identifiable},
        contract::Contract,
        month::MonthKey,
    },
    errors::LedgerError,
};

/// Namespace for the name-based ids of generated obligations.
const GENERATED_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a0e_93b4_4d57_8e21_5a7c_0d3f_b219);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Pending,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Pending => "pending",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentStatus {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(LedgerError::Validation(format!(
                "unknown payment status `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    BankTransfer,
    MobileMoney,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::MobileMoney => "mobile_money",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "bank_transfer" | "transfer" => Ok(PaymentMethod::BankTransfer),
            "mobile_money" | "mobile" => Ok(PaymentMethod::MobileMoney),
            other => Err(LedgerError::Validation(format!(
                "unknown payment method `{other}`"
            ))),
        }
    }
}

/// Identifies one ledger slot: a contract's rent for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerKey {
    pub contract_id: Uuid,
    pub month: MonthKey,
}

impl LedgerKey {
    pub fn new(contract_id: Uuid, month: MonthKey) -> Self {
        Self { contract_id, month }
    }

    /// Deterministic id given to the obligation synthesized for this slot.
    pub fn generated_id(&self) -> Uuid {
        let name = format!("{}:{}", self.contract_id, self.month);
        Uuid::new_v5(&GENERATED_NAMESPACE, name.as_bytes())
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.contract_id, self.month)
    }
}

/// A single line of the rent ledger.
///
/// Stored records carry `generated = false` and a random id; obligations
/// synthesized from active contracts carry `generated = true` and the id
/// returned by [`LedgerKey::generated_id`]. Only the former are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    pub month_key: MonthKey,
    #[serde(default)]
    pub generated: bool,
}

impl PaymentEntry {
    pub fn stored(
        contract_id: Uuid,
        payment_date: NaiveDate,
        amount: f64,
        status: PaymentStatus,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_id,
            payment_date,
            amount,
            status,
            method: Some(method),
            month_key: MonthKey::from_date(payment_date),
            generated: false,
        }
    }

    pub fn obligation(
        contract: &Contract,
        month: MonthKey,
        due_date: NaiveDate,
        status: PaymentStatus,
    ) -> Self {
        let key = LedgerKey::new(contract.id, month);
        Self {
            id: key.generated_id(),
            contract_id: contract.id,
            payment_date: due_date,
            amount: contract.monthly_rent,
            status,
            method: None,
            month_key: month,
            generated: true,
        }
    }

    pub fn key(&self) -> LedgerKey {
        LedgerKey::new(self.contract_id, self.month_key)
    }
}

impl Identifiable for PaymentEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for PaymentEntry {
    fn display_label(&self) -> String {
        let origin = if self.generated { "generated" } else { "stored" };
        format!("payment:{} {} [{}, {}]", self.id, self.key(), self.status, origin)
    }
}

/// User-supplied payment fields, as captured by an entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub contract_id: Option<Uuid>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            contract_id: None,
            payment_date: None,
            amount: None,
            status: PaymentStatus::Paid,
            method: PaymentMethod::default(),
        }
    }
}

/// Form fields after the required ones were checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedPayment {
    pub contract_id: Uuid,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
}

impl PaymentForm {
    /// Pre-fills the form for `contract` with its monthly rent.
    pub fn for_contract(contract: &Contract) -> Self {
        Self {
            contract_id: Some(contract.id),
            amount: Some(contract.monthly_rent),
            ..Self::default()
        }
    }

    /// Loads the form with the values of an existing entry for editing.
    pub fn from_entry(entry: &PaymentEntry) -> Self {
        Self {
            contract_id: Some(entry.contract_id),
            payment_date: Some(entry.payment_date),
            amount: Some(entry.amount),
            status: entry.status,
            method: entry.method.unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedPayment, LedgerError> {
        let mut missing = Vec::new();
        if self.contract_id.is_none() {
            missing.push("contractId");
        }
        if self.payment_date.is_none() {
            missing.push("paymentDate");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        match (self.contract_id, self.payment_date, self.amount) {
            (Some(contract_id), Some(payment_date), Some(amount)) => {
                if !amount.is_finite() {
                    return Err(LedgerError::Validation(format!(
                        "amount must be a finite number, got {amount}"
                    )));
                }
                Ok(ValidatedPayment {
                    contract_id,
                    payment_date,
                    amount,
                    status: self.status,
                    method: self.method,
                })
            }
            _ => Err(LedgerError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}
