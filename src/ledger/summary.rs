//! Dashboard figures computed from reconciled ledgers.

use crate::domain::{Contract, MonthKey, PaymentEntry, PaymentStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusTotals {
    pub count: usize,
    pub amount: f64,
}

impl StatusTotals {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.amount += amount;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub collected: StatusTotals,
    pub unpaid: StatusTotals,
    pub pending: StatusTotals,
    pub generated: usize,
    pub active_contracts: usize,
}

impl MonthSummary {
    pub fn from_ledger(month: MonthKey, ledger: &[PaymentEntry], contracts: &[Contract]) -> Self {
        let mut summary = MonthSummary {
            month,
            collected: StatusTotals::default(),
            unpaid: StatusTotals::default(),
            pending: StatusTotals::default(),
            generated: 0,
            active_contracts: contracts.iter().filter(|c| c.is_active()).count(),
        };
        for entry in ledger {
            match entry.status {
                PaymentStatus::Paid => summary.collected.add(entry.amount),
                PaymentStatus::Unpaid => summary.unpaid.add(entry.amount),
                PaymentStatus::Pending => summary.pending.add(entry.amount),
            }
            if entry.generated {
                summary.generated += 1;
            }
        }
        summary
    }

    /// Rent still expected for the month, overdue or not.
    pub fn expected_remaining(&self) -> f64 {
        self.unpaid.amount + self.pending.amount
    }
}

/// Sum of every stored payment marked unpaid, across all months.
pub fn outstanding_total(stored: &[PaymentEntry]) -> f64 {
    stored
        .iter()
        .filter(|entry| !entry.generated && entry.status == PaymentStatus::Unpaid)
        .map(|entry| entry.amount)
        .sum()
}
