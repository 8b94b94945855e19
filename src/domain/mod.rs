pub mod common;
pub mod contract;
pub mod month;
pub mod payment;

pub use common::{Displayable, Identifiable};
pub use contract::{Contract, ContractStatus, Owner, Property, Tenant};
pub use month::MonthKey;
pub use payment::{
    LedgerKey, PaymentEntry, PaymentForm, PaymentMethod, PaymentStatus, ValidatedPayment,
};
