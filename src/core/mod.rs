//! Application-facing facade over the ledger engine and its stores.

pub mod ledger_manager;

pub use ledger_manager::RentLedgerManager;
