#![doc(test(attr(deny(warnings))))]

//! Rent Ledger reconciles the rent payments recorded by users with the
//! obligations implied by active lease contracts, one calendar month at a time.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::RentLedgerManager;
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Rent ledger tracing initialized.");
    });
}
